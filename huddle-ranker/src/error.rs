//! Errors raised by the ranking pipelines.
#![forbid(unsafe_code)]

use huddle_core::SourceError;
use thiserror::Error;

/// Errors returned by the rank operations.
///
/// The taxonomy is narrow: ranking is pure arithmetic over pre-validated
/// input, so only a malformed radius and collaborator failures can surface.
/// Empty batches, empty interest-tag lists, and degenerate weight hints are
/// all handled without error.
#[derive(Debug, Error)]
pub enum RankError {
    /// The effective search radius cannot be used for querying or scoring.
    #[error("search radius must be positive and finite, got {radius_km}")]
    InvalidRadius {
        /// Radius that failed validation, in kilometres.
        radius_km: f64,
    },
    /// A collaborator lookup failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
