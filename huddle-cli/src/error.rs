//! Error types emitted by the Huddle CLI.
//!
//! Keep this error type reasonably small, as the CLI helpers return
//! `Result<_, CliError>` throughout and the workspace enables
//! `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use huddle_ranker::RankError;
use thiserror::Error;

/// Errors emitted by the Huddle CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An input file's JSON could not be decoded.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The ranker rejected the request.
    #[error("ranking failed: {source}")]
    Rank {
        #[source]
        source: RankError,
    },
    /// Serializing the ranking payload failed.
    #[error("failed to serialize ranking output: {0}")]
    SerializeRanking(#[source] serde_json::Error),
    /// Writing the ranking output failed.
    #[error("failed to write ranking output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
