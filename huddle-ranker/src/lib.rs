//! Ranking pipelines for nearby study groups.
//!
//! The crate provides two independent pipelines that share a common shape:
//! - [`PopularityRanker`] blends batch-normalized member counts with a
//!   linear distance ramp for "popular nearby groups".
//! - [`InterestRanker`] blends an inverse-distance decay with Jaccard
//!   tag similarity for "groups matching my interests".
//!
//! Both are pure, synchronous computations over a candidate batch fetched
//! through the [`CandidateSource`](huddle_core::CandidateSource) seam:
//! resolve the weight pair, score every candidate, stable-sort by final
//! score. No state survives a call, so a single ranker value can serve any
//! number of request-handling threads without locking.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use huddle_core::{GroupCandidate, MemoryGroupSource};
//! use huddle_ranker::{PopularityRanker, PopularityRequest};
//!
//! let source = MemoryGroupSource::with_group(
//!     GroupCandidate::new(1, "Rust circle", Coord { x: 0.0, y: 0.0 }).with_members(8, 12),
//! );
//! let ranker = PopularityRanker::new(source);
//! let ranking = ranker
//!     .rank(&PopularityRequest::new(Coord { x: 0.0, y: 0.0 }))
//!     .expect("rank in-memory groups");
//! assert_eq!(ranking.groups.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod curve;
mod error;
pub mod interest;
pub mod popularity;
mod weights;

pub use error::RankError;
pub use interest::{InterestRanker, InterestRanking, InterestRequest, InterestScoredGroup};
pub use popularity::{
    PopularityRanker, PopularityRanking, PopularityRequest, PopularityScoredGroup,
};
pub use weights::WeightPair;

/// Validate the caller's radius, substituting the pipeline default first.
pub(crate) fn resolve_radius(requested: Option<f64>, default_km: f64) -> Result<f64, RankError> {
    let radius_km = requested.unwrap_or(default_km);
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(radius_km)
    } else {
        Err(RankError::InvalidRadius { radius_km })
    }
}
