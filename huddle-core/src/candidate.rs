//! Candidate study groups produced by the external geo-query layer.
//!
//! A [`GroupCandidate`] is a denormalized row: the query collaborator has
//! already applied geo-bounding, status filtering, and its pre-sort before
//! the engine sees it. Rankers score candidates; they never re-filter.

use geo::Coord;

#[cfg(feature = "serde")]
use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::haversine_km;

/// Lifecycle state of a study group.
///
/// Rankers expect every candidate to be [`GroupStatus::Active`]; enforcing
/// that is the query collaborator's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GroupStatus {
    /// Open and meeting; the only state rankers score.
    #[default]
    Active,
    /// At capacity or closed to new members.
    Closed,
    /// Retired; retained for history only.
    Archived,
}

impl GroupStatus {
    /// Return the status as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One study group considered for ranking in a single call.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use huddle_core::GroupCandidate;
///
/// let group = GroupCandidate::new(1, "Kotlin club", Coord { x: 127.0, y: 37.5 })
///     .with_members(8, 12)
///     .with_tags(["kotlin", "android"]);
/// assert_eq!(group.member_count, 8);
/// assert_eq!(group.tags.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GroupCandidate {
    /// Unique group identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Free-text description, when the group carries one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Approved member count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub member_count: u32,
    /// Capacity ceiling for the group.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_members: u32,
    /// Lifecycle state; rankers assume it is already active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: GroupStatus,
    /// Meeting location, WGS84 with `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Distance from the caller in kilometres, when the query layer has
    /// already computed it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_km: Option<f64>,
    /// Free-text category tags; may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl GroupCandidate {
    /// Construct a candidate with empty optional fields.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            member_count: 0,
            max_members: 0,
            status: GroupStatus::Active,
            location,
            distance_km: None,
            tags: Vec::new(),
        }
    }

    /// Set the member count and capacity while consuming `self`.
    #[must_use]
    pub const fn with_members(mut self, member_count: u32, max_members: u32) -> Self {
        self.member_count = member_count;
        self.max_members = max_members;
        self
    }

    /// Attach a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record the query layer's pre-computed distance in kilometres.
    #[must_use]
    pub const fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    /// Set the lifecycle state.
    #[must_use]
    pub const fn with_status(mut self, status: GroupStatus) -> Self {
        self.status = status;
        self
    }

    /// Replace the candidate's category tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Distance from `origin` in kilometres.
    ///
    /// Prefers the query layer's pre-computed value and otherwise derives it
    /// from the coordinates; the two paths agree to floating rounding.
    #[must_use]
    pub fn distance_from(&self, origin: Coord<f64>) -> f64 {
        self.distance_km
            .unwrap_or_else(|| haversine_km(origin, self.location))
    }
}

/// Parse a JSON-encoded tag column into a tag list.
///
/// The external store persists group tags as a JSON array string. Malformed
/// payloads are logged and collapsed to the empty list so that one bad row
/// never aborts a batch.
///
/// # Examples
///
/// ```
/// use huddle_core::parse_tag_payload;
///
/// assert_eq!(parse_tag_payload(1, r#"["java","spring"]"#), vec!["java", "spring"]);
/// assert!(parse_tag_payload(1, "not json").is_empty());
/// ```
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[must_use]
pub fn parse_tag_payload(group_id: u64, payload: &str) -> Vec<String> {
    match serde_json::from_str(payload) {
        Ok(tags) => tags,
        Err(err) => {
            warn!("discarding malformed tag payload for group {group_id}: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn origin() -> Coord<f64> {
        Coord { x: 0.0, y: 0.0 }
    }

    #[rstest]
    fn prefers_precomputed_distance() {
        let group = GroupCandidate::new(1, "g", Coord { x: 1.0, y: 0.0 }).with_distance_km(42.0);
        assert_eq!(group.distance_from(origin()), 42.0);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating-point distances"
    )]
    fn derives_distance_from_coordinates() {
        let group = GroupCandidate::new(1, "g", Coord { x: 1.0, y: 0.0 });
        let expected = haversine_km(origin(), group.location);
        assert!((group.distance_from(origin()) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn status_displays_lowercase() {
        assert_eq!(GroupStatus::Active.to_string(), "active");
        assert_eq!(GroupStatus::Archived.as_str(), "archived");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#"["java","spring"]"#, &["java", "spring"])]
    #[case("[]", &[])]
    fn parses_tag_payloads(#[case] payload: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_tag_payload(9, payload), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[expect(clippy::expect_used, reason = "tests should fail fast on setup errors")]
    fn serializes_camel_case_fields() {
        let group = GroupCandidate::new(1, "g", Coord { x: 1.0, y: 2.0 }).with_members(3, 10);
        let json = serde_json::to_value(&group).expect("serialize candidate");
        assert_eq!(json["memberCount"], 3);
        assert_eq!(json["maxMembers"], 10);
        assert_eq!(json["status"], "active");
        assert_eq!(json["location"]["x"], 1.0);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case("not json")]
    #[case(r#"{"tag":"java"}"#)]
    #[case(r#"["unterminated"#)]
    fn malformed_tag_payloads_collapse_to_empty(#[case] payload: &str) {
        assert!(parse_tag_payload(9, payload).is_empty());
    }
}
