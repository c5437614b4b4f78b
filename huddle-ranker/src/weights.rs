//! Convex weight pairs shared by the ranking pipelines.
//!
//! Both pipelines blend exactly two component scores. The resolver turns
//! caller-supplied hints into a convex combination, or substitutes the
//! pipeline's default pair when the hints are degenerate.
#![forbid(unsafe_code)]

use log::warn;

/// A pair of blending weights.
///
/// A resolved pair is a convex combination: both components are non-negative
/// and sum to `1.0` within floating tolerance. Each pipeline names its own
/// default pair ([`popularity::DEFAULT_WEIGHTS`](crate::popularity::DEFAULT_WEIGHTS)
/// and [`interest::DEFAULT_WEIGHTS`](crate::interest::DEFAULT_WEIGHTS)); the
/// defaults are distinct tuning choices and deliberately not unified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightPair {
    /// Weight applied to the pipeline's first component.
    pub primary: f64,
    /// Weight applied to the pipeline's second component.
    pub secondary: f64,
}

impl WeightPair {
    /// Construct a pair without normalizing.
    #[must_use]
    pub const fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    /// Resolve caller-supplied weight hints into a convex combination.
    ///
    /// Missing hints count as zero, so "both missing" and "both zero" behave
    /// identically. When the raw sum is not positive (or not finite) the
    /// pipeline's `defaults` pair is returned as-is; otherwise negative
    /// components are clamped to zero and the pair is divided by its sum.
    /// Resolution is idempotent under positive scaling of the hints:
    /// `(2, 3)` and `(4, 6)` resolve to the same pair.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "weight resolution sums and rescales the hint pair"
    )]
    pub fn resolve(primary: Option<f64>, secondary: Option<f64>, defaults: Self) -> Self {
        let raw_primary = primary.unwrap_or(0.0);
        let raw_secondary = secondary.unwrap_or(0.0);
        let raw_sum = raw_primary + raw_secondary;
        if !raw_sum.is_finite() || raw_sum <= 0.0 {
            if primary.is_some() || secondary.is_some() {
                warn!(
                    "degenerate weight hints ({raw_primary}, {raw_secondary}); using pipeline defaults"
                );
            }
            return defaults;
        }
        let clamped_primary = raw_primary.max(0.0);
        let clamped_secondary = raw_secondary.max(0.0);
        let total = clamped_primary + clamped_secondary;
        Self {
            primary: clamped_primary / total,
            secondary: clamped_secondary / total,
        }
    }

    /// Blend two component scores with this pair.
    ///
    /// For a resolved pair and component scores in `[0.0, 1.0]` the result
    /// stays in `[0.0, 1.0]`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "score blending is a weighted sum"
    )]
    pub fn blend(self, primary_score: f64, secondary_score: f64) -> f64 {
        self.primary * primary_score + self.secondary * secondary_score
    }
}
