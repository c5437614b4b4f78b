//! Collaborator seams supplying candidates and user interests.
//!
//! The engine never reaches into storage itself. A [`CandidateSource`]
//! materializes the geo-filtered candidate batch and an [`InterestSource`]
//! supplies a user's interest tags; both are ordinary filtered retrieval
//! owned by the calling system.

use geo::Coord;
use thiserror::Error;

use crate::GroupCandidate;

/// Geo-bounded candidate query passed to a [`CandidateSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupQuery {
    /// Caller's location, WGS84 with `x = longitude`, `y = latitude`.
    pub origin: Coord<f64>,
    /// Search boundary in kilometres.
    pub radius_km: f64,
    /// Cap on the number of candidates returned, when the pipeline wants the
    /// query layer to cut the batch; `None` fetches everything in range.
    pub limit: Option<usize>,
}

/// Errors raised by candidate and interest collaborators.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing store could not satisfy a lookup.
    #[error("{operation} failed")]
    Backend {
        /// Description of the failed lookup.
        operation: &'static str,
        /// Underlying collaborator error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Read-only access to geo-filtered candidate study groups.
///
/// Implementations own geo-bounding, lifecycle-status filtering, and the
/// member-count/distance pre-sort; rankers score whatever batch they are
/// given and rely on the batch order only for tie-breaking.
/// Implementations must be `Send + Sync` so rankers can be shared across
/// request-handling threads.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use huddle_core::{CandidateSource, GroupCandidate, GroupQuery, SourceError};
///
/// struct SingleGroup(GroupCandidate);
///
/// impl CandidateSource for SingleGroup {
///     fn groups_near(&self, _query: &GroupQuery) -> Result<Vec<GroupCandidate>, SourceError> {
///         Ok(vec![self.0.clone()])
///     }
/// }
///
/// let group = GroupCandidate::new(1, "Study circle", Coord { x: 0.0, y: 0.0 });
/// let source = SingleGroup(group.clone());
/// let query = GroupQuery {
///     origin: Coord { x: 0.0, y: 0.0 },
///     radius_km: 2.0,
///     limit: Some(10),
/// };
/// let groups = source.groups_near(&query).expect("in-memory lookup");
/// assert_eq!(groups, vec![group]);
/// ```
pub trait CandidateSource: Send + Sync {
    /// Return active groups within the query radius, pre-sorted by member
    /// count descending then distance ascending.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the backing store cannot be queried.
    fn groups_near(&self, query: &GroupQuery) -> Result<Vec<GroupCandidate>, SourceError>;
}

/// Lookup of a user's declared interest tags.
///
/// Unknown users yield an empty list, never an error; an empty list simply
/// scores zero similarity everywhere.
pub trait InterestSource: Send + Sync {
    /// Return the user's interest tags in declaration order.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the backing store cannot be queried.
    fn interest_tags(&self, user_id: u64) -> Result<Vec<String>, SourceError>;
}
