//! Great-circle distance on the spherical Earth approximation.

use geo::Coord;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two WGS84 coordinates, in kilometres.
///
/// Coordinates follow the workspace convention of `x = longitude` and
/// `y = latitude` in decimal degrees. The function is pure and total:
/// identical points yield `0.0`. It does not validate degree ranges;
/// out-of-range input produces a mathematically defined but meaningless
/// value, and callers own that validation.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use huddle_core::haversine_km;
///
/// let berlin = Coord { x: 13.405, y: 52.52 };
/// assert_eq!(haversine_km(berlin, berlin), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "spherical trigonometry is floating-point by nature"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let delta_lat = (b.y - a.y).to_radians();
    let delta_lng = (b.x - a.x).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let arc = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * arc
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // One degree of longitude on the equator.
    const ONE_DEGREE_KM: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

    #[rstest]
    fn identical_points_are_zero() {
        let point = Coord { x: 9.99, y: -45.0 };
        assert_eq!(haversine_km(point, point), 0.0);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating-point distances"
    )]
    fn one_degree_on_the_equator() {
        let origin = Coord { x: 0.0, y: 0.0 };
        let east = Coord { x: 1.0, y: 0.0 };
        let distance = haversine_km(origin, east);
        assert!(
            (distance - ONE_DEGREE_KM).abs() < 1e-9,
            "expected {ONE_DEGREE_KM}, got {distance}"
        );
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating-point distances"
    )]
    fn is_symmetric() {
        let a = Coord { x: 13.405, y: 52.52 };
        let b = Coord { x: 2.3522, y: 48.8566 };
        let forward = haversine_km(a, b);
        let backward = haversine_km(b, a);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare floating-point distances"
    )]
    fn berlin_to_paris_is_plausible() {
        let berlin = Coord { x: 13.405, y: 52.52 };
        let paris = Coord { x: 2.3522, y: 48.8566 };
        let distance = haversine_km(berlin, paris);
        assert!(
            (850.0..900.0).contains(&distance),
            "expected roughly 878 km, got {distance}"
        );
    }
}
