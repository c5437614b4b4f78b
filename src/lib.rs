//! Facade crate for the Huddle study-group recommendation engine.
//!
//! This crate re-exports the core domain types and the two ranking
//! pipelines so callers can depend on a single crate.

#![forbid(unsafe_code)]

pub use huddle_core::{
    CandidateSource, EARTH_RADIUS_KM, GroupCandidate, GroupQuery, GroupStatus, InterestSource,
    MemoryGroupSource, MemoryInterestSource, SourceError, TagSet, haversine_km,
};

#[cfg(feature = "serde")]
pub use huddle_core::parse_tag_payload;

pub use huddle_ranker::{
    InterestRanker, InterestRanking, InterestRequest, InterestScoredGroup, PopularityRanker,
    PopularityRanking, PopularityRequest, PopularityScoredGroup, RankError, WeightPair,
};
