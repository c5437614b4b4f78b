//! Normalized interest tags and set similarity.
//!
//! Tags arrive as free text from users and group records with no casing,
//! whitespace, or uniqueness guarantees. [`TagSet`] normalizes them once so
//! similarity always compares like with like.

use std::collections::BTreeSet;

/// A de-duplicated set of normalized (case-folded, trimmed) tags.
///
/// # Examples
///
/// ```
/// use huddle_core::TagSet;
///
/// let tags = TagSet::from_tags(["Java", " java ", "Spring"]);
/// assert_eq!(tags.len(), 2);
/// assert!(tags.contains("spring"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    tags: BTreeSet<String>,
}

impl TagSet {
    /// Construct an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tags: BTreeSet::new(),
        }
    }

    /// Build a normalized set from free-text tags.
    ///
    /// Each tag is trimmed and case-folded; blank entries are dropped and
    /// duplicates collapse.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|tag| tag.as_ref().trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        Self { tags }
    }

    /// Number of distinct normalized tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Report whether the set holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Report whether a normalized tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Jaccard similarity with another set: `|A ∩ B| / |A ∪ B|`.
    ///
    /// Returns `0.0` by definition when either set is empty, and `1.0` when
    /// both sets are equal and non-empty. Symmetric in its arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use huddle_core::TagSet;
    ///
    /// let user = TagSet::from_tags(["java", "spring"]);
    /// let group = TagSet::from_tags(["Java", "Python"]);
    /// let similarity = user.jaccard(&group);
    /// assert!((similarity - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "similarity divides small set cardinalities"
    )]
    pub fn jaccard(&self, other: &Self) -> f64 {
        if self.tags.is_empty() || other.tags.is_empty() {
            return 0.0;
        }
        let intersection = self.tags.intersection(&other.tags).count();
        let union = self.tags.union(&other.tags).count();
        intersection as f64 / union as f64
    }
}
