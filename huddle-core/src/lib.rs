//! Core domain types for the Huddle recommendation engine.
//!
//! The crate defines the candidate model shared by the ranking pipelines,
//! the collaborator seams that supply candidates and user interest tags, and
//! the great-circle distance primitive. Scoring itself lives in
//! `huddle-ranker`; persistence, authentication, and request routing are the
//! calling system's concern and never appear here.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use huddle_core::{GroupCandidate, haversine_km};
//!
//! let group = GroupCandidate::new(7, "Rust study circle", Coord { x: 13.4, y: 52.5 });
//! let origin = Coord { x: 13.5, y: 52.5 };
//! let direct = haversine_km(origin, group.location);
//! assert!((group.distance_from(origin) - direct).abs() < 1e-12);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod distance;
mod interests;
mod memory;
mod source;

#[cfg(feature = "serde")]
pub use candidate::parse_tag_payload;
pub use candidate::{GroupCandidate, GroupStatus};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use interests::TagSet;
pub use memory::{MemoryGroupSource, MemoryInterestSource};
pub use source::{CandidateSource, GroupQuery, InterestSource, SourceError};
