//! "Popular nearby groups" ranking pipeline.
//!
//! Scores each candidate as a convex combination of batch-normalized
//! popularity and a linear distance ramp, then orders the batch by final
//! score. Every reported value is rounded to two decimal places for output
//! stability. The pipeline reports the request limit but does not truncate
//! the scored list; the query layer's cap bounds the batch instead (see
//! [`PopularityRanker::rank`]).
#![forbid(unsafe_code)]

use geo::Coord;
use serde::{Deserialize, Serialize};

use huddle_core::{CandidateSource, GroupCandidate, GroupQuery};

use crate::{RankError, WeightPair, curve, resolve_radius};

/// Default search radius in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 2.0;

/// Default candidate-fetch limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Default popularity/distance weighting.
pub const DEFAULT_WEIGHTS: WeightPair = WeightPair::new(0.7, 0.3);

/// Criteria label reported in the ranking payload.
pub const CRITERIA: &str = "popularity";

/// Parameters for a popularity ranking call.
///
/// Every optional field falls back to its pipeline default when absent.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use huddle_ranker::PopularityRequest;
///
/// let request = PopularityRequest::new(Coord { x: 13.4, y: 52.5 })
///     .with_radius_km(1.5)
///     .with_weights(0.8, 0.2);
/// assert_eq!(request.radius_km, Some(1.5));
/// assert_eq!(request.limit, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityRequest {
    /// Caller's location, WGS84 with `x = longitude`, `y = latitude`.
    pub origin: Coord<f64>,
    /// Search boundary in kilometres; defaults to [`DEFAULT_RADIUS_KM`].
    #[serde(default)]
    pub radius_km: Option<f64>,
    /// Candidate-fetch limit; defaults to [`DEFAULT_LIMIT`].
    #[serde(default)]
    pub limit: Option<usize>,
    /// Hint for the popularity component weight.
    #[serde(default)]
    pub popularity_weight: Option<f64>,
    /// Hint for the distance component weight.
    #[serde(default)]
    pub distance_weight: Option<f64>,
}

impl PopularityRequest {
    /// Construct a request that uses every pipeline default.
    #[must_use]
    pub const fn new(origin: Coord<f64>) -> Self {
        Self {
            origin,
            radius_km: None,
            limit: None,
            popularity_weight: None,
            distance_weight: None,
        }
    }

    /// Override the search radius while consuming `self`.
    #[must_use]
    pub const fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Override the candidate-fetch limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Provide explicit weight hints for both components.
    #[must_use]
    pub const fn with_weights(mut self, popularity_weight: f64, distance_weight: f64) -> Self {
        self.popularity_weight = Some(popularity_weight);
        self.distance_weight = Some(distance_weight);
        self
    }
}

/// A candidate with its computed popularity-pipeline scores.
///
/// All floating values are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityScoredGroup {
    /// Group identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Free-text description, when the group carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Approved member count.
    pub member_count: u32,
    /// Capacity ceiling for the group.
    pub max_members: u32,
    /// Distance from the caller in kilometres.
    pub distance_km: f64,
    /// Linear distance score in `[0.0, 1.0]`.
    pub distance_score: f64,
    /// Batch-normalized popularity score in `[0.0, 1.0]`.
    pub popularity_score: f64,
    /// Convex combination of the component scores.
    pub final_score: f64,
}

/// Ordered ranking returned by [`PopularityRanker::rank`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityRanking {
    /// Ranking strategy label, always [`CRITERIA`].
    pub criteria: String,
    /// Radius used for the candidate query, in kilometres.
    pub radius_km: f64,
    /// Limit passed to the candidate query.
    pub limit: usize,
    /// Scored groups, best first.
    pub groups: Vec<PopularityScoredGroup>,
}

/// Ranks active study groups by popularity blended with proximity.
///
/// The ranker is generic over the candidate seam so callers can plug in any
/// query layer; each call is a pure function of the fetched batch.
#[derive(Debug, Clone)]
pub struct PopularityRanker<S: CandidateSource> {
    source: S,
}

impl<S: CandidateSource> PopularityRanker<S> {
    /// Construct a ranker over a candidate source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Rank groups near the caller by blended popularity and proximity.
    ///
    /// The scored list keeps every fetched candidate: the request limit
    /// bounds the candidate query, not the response. Ties in the rounded
    /// final score keep the batch order, which the query layer pre-sorts by
    /// member count descending then distance ascending; that tie-break is an
    /// observable contract, not an accident.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidRadius`] for a non-positive or non-finite
    /// radius and [`RankError::Source`] when the candidate lookup fails.
    pub fn rank(&self, request: &PopularityRequest) -> Result<PopularityRanking, RankError> {
        let radius_km = resolve_radius(request.radius_km, DEFAULT_RADIUS_KM)?;
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
        let weights = WeightPair::resolve(
            request.popularity_weight,
            request.distance_weight,
            DEFAULT_WEIGHTS,
        );
        let query = GroupQuery {
            origin: request.origin,
            radius_km,
            limit: Some(limit),
        };
        let candidates = self.source.groups_near(&query)?;
        let groups = score_batch(request.origin, radius_km, weights, candidates);
        Ok(PopularityRanking {
            criteria: CRITERIA.to_owned(),
            radius_km,
            limit,
            groups,
        })
    }
}

/// Member count normalized against the largest group in the batch.
///
/// The maximum is recomputed per call, never a global constant. A zero
/// maximum (or an otherwise degenerate denominator) scores `0.0` rather
/// than dividing by zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "popularity divides member counts"
)]
pub fn popularity_score(member_count: u32, batch_max: u32) -> f64 {
    if batch_max == 0 {
        return 0.0;
    }
    f64::from(member_count) / f64::from(batch_max)
}

fn score_batch(
    origin: Coord<f64>,
    radius_km: f64,
    weights: WeightPair,
    candidates: Vec<GroupCandidate>,
) -> Vec<PopularityScoredGroup> {
    let batch_max = candidates
        .iter()
        .map(|candidate| candidate.member_count)
        .max()
        .unwrap_or(0);
    let mut scored: Vec<PopularityScoredGroup> = candidates
        .into_iter()
        .map(|candidate| score_candidate(origin, radius_km, weights, batch_max, candidate))
        .collect();
    // Stable sort: equal rounded finals keep the query layer's pre-sort.
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    scored
}

fn score_candidate(
    origin: Coord<f64>,
    radius_km: f64,
    weights: WeightPair,
    batch_max: u32,
    candidate: GroupCandidate,
) -> PopularityScoredGroup {
    let distance_km = candidate.distance_from(origin);
    let distance_score = curve::linear_within_radius(distance_km, radius_km);
    let pop_score = popularity_score(candidate.member_count, batch_max);
    let final_score = weights.blend(pop_score, distance_score);
    PopularityScoredGroup {
        id: candidate.id,
        title: candidate.title,
        description: candidate.description,
        member_count: candidate.member_count,
        max_members: candidate.max_members,
        distance_km: round2(distance_km),
        distance_score: round2(distance_score),
        popularity_score: round2(pop_score),
        final_score: round2(final_score),
    }
}

/// Round a reported value to two decimal places.
#[expect(
    clippy::float_arithmetic,
    reason = "rounding scales by a constant factor"
)]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
