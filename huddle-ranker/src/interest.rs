//! "Interest match" ranking pipeline.
//!
//! Scores each candidate as a convex combination of an inverse-distance
//! decay and Jaccard similarity between the caller's interest tags and the
//! group's category tags. Unlike the popularity pipeline, the scored list is
//! truncated to the request limit after sorting, and values are reported at
//! full precision.
#![forbid(unsafe_code)]

use geo::Coord;
use serde::{Deserialize, Serialize};

use huddle_core::{CandidateSource, GroupCandidate, GroupQuery, InterestSource, TagSet};

use crate::{RankError, WeightPair, curve, resolve_radius};

/// Default search radius in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Default result limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Default distance/tag weighting (alpha, beta).
pub const DEFAULT_WEIGHTS: WeightPair = WeightPair::new(0.5, 0.5);

/// Criteria label reported in the ranking payload.
pub const CRITERIA: &str = "interest-match";

/// Parameters for an interest-match ranking call.
///
/// The user id is used only to fetch interest tags from the
/// [`InterestSource`]; it never contributes to scoring directly. Every
/// optional field falls back to its pipeline default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRequest {
    /// Caller's user identifier.
    pub user_id: u64,
    /// Caller's location, WGS84 with `x = longitude`, `y = latitude`.
    pub origin: Coord<f64>,
    /// Search boundary in kilometres; defaults to [`DEFAULT_RADIUS_KM`].
    #[serde(default)]
    pub radius_km: Option<f64>,
    /// Result limit applied after sorting; defaults to [`DEFAULT_LIMIT`].
    #[serde(default)]
    pub limit: Option<usize>,
    /// Hint for the distance component weight (alpha).
    #[serde(default)]
    pub distance_weight: Option<f64>,
    /// Hint for the tag-similarity component weight (beta).
    #[serde(default)]
    pub tag_weight: Option<f64>,
}

impl InterestRequest {
    /// Construct a request that uses every pipeline default.
    #[must_use]
    pub const fn new(user_id: u64, origin: Coord<f64>) -> Self {
        Self {
            user_id,
            origin,
            radius_km: None,
            limit: None,
            distance_weight: None,
            tag_weight: None,
        }
    }

    /// Override the search radius while consuming `self`.
    #[must_use]
    pub const fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Override the result limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Provide explicit weight hints for both components.
    #[must_use]
    pub const fn with_weights(mut self, distance_weight: f64, tag_weight: f64) -> Self {
        self.distance_weight = Some(distance_weight);
        self.tag_weight = Some(tag_weight);
        self
    }
}

/// A candidate with its computed interest-pipeline scores, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestScoredGroup {
    /// Group identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Category tags as supplied by the query layer.
    pub tags: Vec<String>,
    /// Distance from the caller in kilometres.
    pub distance_km: f64,
    /// Inverse-distance score in `(0.0, 1.0]`.
    pub distance_score: f64,
    /// Jaccard similarity between user and group tags in `[0.0, 1.0]`.
    pub tag_similarity: f64,
    /// Convex combination of the component scores.
    pub final_score: f64,
}

/// Ordered, limit-truncated ranking returned by [`InterestRanker::rank`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRanking {
    /// Ranking strategy label, always [`CRITERIA`].
    pub criteria: String,
    /// Radius used for the candidate query, in kilometres.
    pub radius_km: f64,
    /// Result limit applied after sorting.
    pub limit: usize,
    /// Scored groups, best first, at most `limit` entries.
    pub groups: Vec<InterestScoredGroup>,
}

/// Ranks active study groups by interest-tag similarity blended with
/// proximity.
///
/// Generic over both collaborator seams; each call is a pure function of the
/// fetched batch and the user's tags.
#[derive(Debug, Clone)]
pub struct InterestRanker<S: CandidateSource, I: InterestSource> {
    groups: S,
    interests: I,
}

impl<S: CandidateSource, I: InterestSource> InterestRanker<S, I> {
    /// Construct a ranker over candidate and interest sources.
    pub const fn new(groups: S, interests: I) -> Self {
        Self { groups, interests }
    }

    /// Rank groups near the caller by blended proximity and tag similarity.
    ///
    /// The user's tags are fetched first; an unknown user simply scores zero
    /// similarity everywhere. The scored list is sorted by final score
    /// descending (ties keep the batch order) and truncated to the limit;
    /// the candidate query itself is not capped, so the truncation is
    /// scoring-aware.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidRadius`] for a non-positive or non-finite
    /// radius and [`RankError::Source`] when either collaborator fails.
    pub fn rank(&self, request: &InterestRequest) -> Result<InterestRanking, RankError> {
        let radius_km = resolve_radius(request.radius_km, DEFAULT_RADIUS_KM)?;
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
        let weights = WeightPair::resolve(
            request.distance_weight,
            request.tag_weight,
            DEFAULT_WEIGHTS,
        );
        let user_tags = TagSet::from_tags(self.interests.interest_tags(request.user_id)?);
        let query = GroupQuery {
            origin: request.origin,
            radius_km,
            limit: None,
        };
        let candidates = self.groups.groups_near(&query)?;
        let mut scored: Vec<InterestScoredGroup> = candidates
            .into_iter()
            .map(|candidate| score_candidate(request.origin, weights, &user_tags, candidate))
            .collect();
        // Stable sort keeps the query layer's pre-sort for equal finals.
        scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        scored.truncate(limit);
        Ok(InterestRanking {
            criteria: CRITERIA.to_owned(),
            radius_km,
            limit,
            groups: scored,
        })
    }
}

fn score_candidate(
    origin: Coord<f64>,
    weights: WeightPair,
    user_tags: &TagSet,
    candidate: GroupCandidate,
) -> InterestScoredGroup {
    let distance_km = candidate.distance_from(origin);
    let distance_score = curve::inverse_distance(distance_km);
    let tag_similarity = user_tags.jaccard(&TagSet::from_tags(&candidate.tags));
    let final_score = weights.blend(distance_score, tag_similarity);
    InterestScoredGroup {
        id: candidate.id,
        title: candidate.title,
        tags: candidate.tags,
        distance_km,
        distance_score,
        tag_similarity,
        final_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_core::{MemoryGroupSource, MemoryInterestSource};
    use rstest::rstest;

    const USER: u64 = 42;

    fn origin() -> Coord<f64> {
        Coord { x: 0.0, y: 0.0 }
    }

    fn group(id: u64, distance_km: f64, tags: &[&str]) -> GroupCandidate {
        GroupCandidate::new(id, format!("group-{id}"), origin())
            .with_members(5, 20)
            .with_distance_km(distance_km)
            .with_tags(tags.iter().copied())
    }

    fn ranker(
        groups: MemoryGroupSource,
    ) -> InterestRanker<MemoryGroupSource, MemoryInterestSource> {
        let interests = MemoryInterestSource::new().with_tags(USER, ["java", "spring"]);
        InterestRanker::new(groups, interests)
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating-point scores"
    )]
    fn ranks_tag_matches_above_closer_mismatches() {
        // Candidate A: 1 km away, tags {java, python} -> similarity 1/3.
        // Candidate B: 4 km away, tags {java, spring} -> similarity 1.
        // With alpha = beta = 0.5, B (0.6) must outrank A (~0.417).
        let source = MemoryGroupSource::with_groups([
            group(1, 1.0, &["Java", "Python"]),
            group(2, 4.0, &["java", "spring"]),
        ]);
        let request = InterestRequest::new(USER, origin())
            .with_radius_km(5.0)
            .with_weights(0.5, 0.5);

        let ranking = ranker(source).rank(&request).expect("rank groups");

        let ids: Vec<u64> = ranking.groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1]);
        let best = ranking.groups.first().expect("non-empty ranking");
        assert_eq!(best.distance_score, 0.2);
        assert_eq!(best.tag_similarity, 1.0);
        assert!((best.final_score - 0.6).abs() < 1e-12);
        let runner_up = ranking.groups.last().expect("non-empty ranking");
        assert_eq!(runner_up.distance_score, 0.5);
        assert!((runner_up.tag_similarity - 1.0 / 3.0).abs() < 1e-12);
        assert!((runner_up.final_score - (0.25 + 1.0 / 6.0)).abs() < 1e-12);
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn unknown_users_score_zero_similarity() {
        let source = MemoryGroupSource::with_group(group(1, 1.0, &["java"]));
        let interests = MemoryInterestSource::new();
        let ranking = InterestRanker::new(source, interests)
            .rank(&InterestRequest::new(7, origin()))
            .expect("rank groups");
        let only = ranking.groups.first().expect("non-empty ranking");
        assert_eq!(only.tag_similarity, 0.0);
        assert_eq!(only.distance_score, 0.5);
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn untagged_groups_rank_by_distance_alone() {
        let source = MemoryGroupSource::with_groups([
            group(1, 3.0, &[]),
            group(2, 1.0, &[]),
        ]);
        let ranking = ranker(source)
            .rank(&InterestRequest::new(USER, origin()))
            .expect("rank groups");
        let ids: Vec<u64> = ranking.groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(ranking.groups.iter().all(|g| g.tag_similarity == 0.0));
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn truncates_to_the_limit_after_sorting() {
        let source = MemoryGroupSource::with_groups(
            (1_u32..=6).map(|id| group(u64::from(id), f64::from(id), &["java"])),
        );
        let request = InterestRequest::new(USER, origin())
            .with_radius_km(10.0)
            .with_limit(4);

        let ranking = ranker(source).rank(&request).expect("rank groups");

        assert_eq!(ranking.groups.len(), 4);
        // Closest groups survive the cut under the inverse-distance curve.
        let ids: Vec<u64> = ranking.groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn zero_weight_hints_fall_back_to_even_defaults() {
        let source = MemoryGroupSource::with_group(group(1, 1.0, &["java", "spring"]));
        let request = InterestRequest::new(USER, origin()).with_weights(0.0, 0.0);
        let ranking = ranker(source).rank(&request).expect("rank groups");
        let only = ranking.groups.first().expect("non-empty ranking");
        // 0.5 * 0.5 + 0.5 * 1.0 under the restored 0.5/0.5 defaults.
        assert_eq!(only.final_score, 0.75);
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn serializes_the_documented_field_names() {
        let source = MemoryGroupSource::with_group(group(1, 1.0, &["java"]));
        let ranking = ranker(source)
            .rank(&InterestRequest::new(USER, origin()))
            .expect("rank groups");
        let json = serde_json::to_value(&ranking).expect("serialize ranking");
        assert_eq!(json["criteria"], "interest-match");
        assert_eq!(json["radiusKm"], 5.0);
        let first = &json["groups"][0];
        assert_eq!(first["distanceKm"], 1.0);
        assert!(first["distanceScore"].is_number());
        assert!(first["tagSimilarity"].is_number());
        assert!(first["finalScore"].is_number());
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn rejects_unusable_radii() {
        let request = InterestRequest::new(USER, origin()).with_radius_km(0.0);
        let err = ranker(MemoryGroupSource::default())
            .rank(&request)
            .expect_err("radius must be rejected");
        assert!(matches!(err, RankError::InvalidRadius { .. }));
    }
}
