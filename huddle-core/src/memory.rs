//! In-memory collaborator implementations.
//!
//! [`MemoryGroupSource`] and [`MemoryInterestSource`] are the reference
//! implementations of the collaborator seams: offline tooling loads JSON
//! fixtures into them and the test suites drive the rankers through them.
//! Both perform linear scans and suit small candidate sets only.

use std::collections::HashMap;

use crate::{
    CandidateSource, GroupCandidate, GroupQuery, GroupStatus, InterestSource, SourceError,
};

/// In-memory [`CandidateSource`] over a fixed group collection.
///
/// The source emulates the external geo-query layer: it keeps only active
/// groups inside the query radius, stamps each hit with its distance from
/// the origin, pre-sorts by member count descending then distance ascending,
/// and applies the query's cap when one is set.
#[derive(Debug, Clone, Default)]
pub struct MemoryGroupSource {
    groups: Vec<GroupCandidate>,
}

impl MemoryGroupSource {
    /// Create a source containing a single group.
    #[must_use]
    pub fn with_group(group: GroupCandidate) -> Self {
        Self::with_groups(std::iter::once(group))
    }

    /// Create a source from a collection of groups.
    pub fn with_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = GroupCandidate>,
    {
        Self {
            groups: groups.into_iter().collect(),
        }
    }
}

impl CandidateSource for MemoryGroupSource {
    fn groups_near(&self, query: &GroupQuery) -> Result<Vec<GroupCandidate>, SourceError> {
        let mut hits: Vec<GroupCandidate> = self
            .groups
            .iter()
            .filter(|group| group.status == GroupStatus::Active)
            .map(|group| {
                let mut hit = group.clone();
                hit.distance_km = Some(group.distance_from(query.origin));
                hit
            })
            .filter(|hit| hit.distance_from(query.origin) <= query.radius_km)
            .collect();
        hits.sort_by(|a, b| {
            b.member_count.cmp(&a.member_count).then_with(|| {
                a.distance_from(query.origin)
                    .total_cmp(&b.distance_from(query.origin))
            })
        });
        if let Some(limit) = query.limit {
            hits.truncate(limit);
        }
        Ok(hits)
    }
}

/// In-memory [`InterestSource`] keyed by user identifier.
#[derive(Debug, Clone, Default)]
pub struct MemoryInterestSource {
    tags: HashMap<u64, Vec<String>>,
}

impl MemoryInterestSource {
    /// Create an empty source; every lookup yields no tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user's interest tags while consuming `self`.
    #[must_use]
    pub fn with_tags<I, S>(mut self, user_id: u64, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .insert(user_id, tags.into_iter().map(Into::into).collect());
        self
    }
}

impl InterestSource for MemoryInterestSource {
    fn interest_tags(&self, user_id: u64) -> Result<Vec<String>, SourceError> {
        Ok(self.tags.get(&user_id).cloned().unwrap_or_default())
    }
}
