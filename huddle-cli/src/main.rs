//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = huddle_cli::run() {
        eprintln!("huddle: {err}");
        std::process::exit(1);
    }
}
