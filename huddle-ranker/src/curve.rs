//! Distance-to-score curves.
//!
//! The two pipelines normalize distance with different shapes, and both are
//! deliberate: the linear ramp treats the search radius as its zero point,
//! while the inverse decay favours very close groups more sharply and uses
//! the radius only as a candidate-set boundary.
#![forbid(unsafe_code)]

/// Linear ramp from `1.0` at the origin to `0.0` at `radius_km`.
///
/// The result is clamped into `[0.0, 1.0]`, so distances at or beyond the
/// radius never go negative. A non-positive or non-finite radius yields
/// `0.0`; rankers reject such radii at the boundary before scoring
/// ([`RankError::InvalidRadius`](crate::RankError::InvalidRadius)), the
/// guard merely keeps the function total.
///
/// # Examples
///
/// ```
/// use huddle_ranker::curve::linear_within_radius;
///
/// assert_eq!(linear_within_radius(0.0, 2.0), 1.0);
/// assert_eq!(linear_within_radius(0.5, 2.0), 0.75);
/// assert_eq!(linear_within_radius(3.0, 2.0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the curve divides distance by the radius"
)]
pub fn linear_within_radius(distance_km: f64, radius_km: f64) -> f64 {
    if radius_km.is_nan() || radius_km <= 0.0 {
        return 0.0;
    }
    (1.0 - distance_km / radius_km).clamp(0.0, 1.0)
}

/// Inverse decay `1 / (1 + distance)`.
///
/// Strictly decreasing for non-negative distances, exactly `1.0` only at
/// zero, and never reaching `0.0`. Negative distances never occur upstream
/// and yield `0.0` by explicit guard.
///
/// # Examples
///
/// ```
/// use huddle_ranker::curve::inverse_distance;
///
/// assert_eq!(inverse_distance(0.0), 1.0);
/// assert_eq!(inverse_distance(1.0), 0.5);
/// assert_eq!(inverse_distance(4.0), 0.2);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the curve divides by the shifted distance"
)]
pub fn inverse_distance(distance_km: f64) -> f64 {
    if distance_km.is_nan() || distance_km < 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + distance_km)
}
