//! Distance and area math for proximity queries.
//!
//! Two query shapes are supported:
//!
//! - **Radius**: exact geodesic distance on the WGS84 ellipsoid
//!   (`geo::Geodesic`, Karney 2013). A degree envelope is only used to prune
//!   the R-tree before the exact check.
//! - **Box**: a flat-earth rectangle built at the center latitude with
//!   `1° latitude ≈ 111000 m` and `1° longitude ≈ 111000 m × cos(latitude)`.
//!   Distortion grows with the box size and with distance from the equator.
//!   Results for existing callers depend on this exact approximation.

use crate::compute::validation::validate_distance;
use crate::error::{DirectoryError, Result};
use geo::{Distance, Geodesic, Point, Rect, coord};

/// Meters in one degree, used by the box approximation.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Mean Earth radius in meters (IUGG).
pub const MEAN_EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Widening applied to the radius envelope. A meridian degree is as short as
/// ~110574 m at the equator, ~0.6% less than the spherical mean.
const ENVELOPE_PADDING: f64 = 1.02;

/// A proximity query: exactly one of radius or width/height.
///
/// # Examples
///
/// ```rust
/// use orgdir::ProximityQuery;
///
/// let q = ProximityQuery::from_params(Some(1000.0), None, None).unwrap();
/// assert_eq!(q, ProximityQuery::Radius { meters: 1000.0 });
///
/// // Both modes at once is a caller error
/// assert!(ProximityQuery::from_params(Some(1000.0), Some(10.0), Some(10.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProximityQuery {
    /// Circle of `meters` around the center
    Radius { meters: f64 },
    /// Rectangle `width` × `height` meters centered on the center
    Box { width: f64, height: f64 },
}

impl ProximityQuery {
    pub fn radius(meters: f64) -> Self {
        ProximityQuery::Radius { meters }
    }

    pub fn rect(width: f64, height: f64) -> Self {
        ProximityQuery::Box { width, height }
    }

    /// Lenient conversion: radius wins, then width and height together.
    /// Returns `None` when neither mode is complete.
    pub fn from_parts(radius: Option<f64>, width: Option<f64>, height: Option<f64>) -> Option<Self> {
        match (radius, width, height) {
            (Some(meters), _, _) => Some(ProximityQuery::Radius { meters }),
            (None, Some(width), Some(height)) => Some(ProximityQuery::Box { width, height }),
            _ => None,
        }
    }

    /// Strict conversion for request parameters.
    ///
    /// Requires either a radius alone or width and height together, each a
    /// finite non-negative number of meters.
    pub fn from_params(
        radius: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<Self> {
        let query = match (radius, width, height) {
            (Some(_), None, None) | (None, Some(_), Some(_)) => {
                Self::from_parts(radius, width, height)
            }
            (Some(_), _, _) => {
                return Err(DirectoryError::Validation(
                    "provide either radius or rectangular dimensions, not both".to_string(),
                ));
            }
            _ => None,
        };

        let query = query.ok_or_else(|| {
            DirectoryError::Validation(
                "provide either radius or both width and height".to_string(),
            )
        })?;
        query.validate()?;
        Ok(query)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            ProximityQuery::Radius { meters } => validate_distance("radius", meters),
            ProximityQuery::Box { width, height } => {
                validate_distance("width", width)?;
                validate_distance("height", height)
            }
        }
    }
}

/// Geodesic distance in meters between two lon/lat points.
///
/// ```rust
/// use orgdir::compute::geodesic_distance;
/// use geo::Point;
///
/// let a = Point::new(37.6173, 55.7558);
/// let b = Point::new(37.7015, 55.7935);
/// let d = geodesic_distance(&a, &b);
/// assert!(d > 6_000.0 && d < 7_000.0);
/// ```
pub fn geodesic_distance(a: &Point, b: &Point) -> f64 {
    Geodesic.distance(*a, *b)
}

/// Degree rectangle guaranteed to contain every point within `radius_meters`
/// of `center`. Widens to all longitudes when the circle reaches a pole or
/// crosses the antimeridian.
pub fn radius_envelope(center: &Point, radius_meters: f64) -> Rect {
    let (lon, lat) = (center.x(), center.y());
    let lat_delta = (radius_meters / MEAN_EARTH_RADIUS_METERS).to_degrees() * ENVELOPE_PADDING;

    let min_lat = (lat - lat_delta).max(-90.0);
    let max_lat = (lat + lat_delta).min(90.0);

    // The circle is widest in longitude at its most poleward latitude.
    let widest_lat = lat.abs() + lat_delta;
    let (min_lon, max_lon) = if widest_lat >= 90.0 {
        (-180.0, 180.0)
    } else {
        let lon_delta = (radius_meters
            / (MEAN_EARTH_RADIUS_METERS * widest_lat.to_radians().cos()))
        .to_degrees()
            * ENVELOPE_PADDING;
        if lon - lon_delta < -180.0 || lon + lon_delta > 180.0 {
            (-180.0, 180.0)
        } else {
            (lon - lon_delta, lon + lon_delta)
        }
    };

    Rect::new(
        coord! { x: min_lon, y: min_lat },
        coord! { x: max_lon, y: max_lat },
    )
}

/// Flat-earth rectangle of `width` × `height` meters centered on `center`.
///
/// `Δlat = height / (2 × 111000)` and
/// `Δlon = width / (2 × 111000 × cos(center latitude))`. This is an
/// approximation, not a geodesic rectangle.
///
/// ```rust
/// use orgdir::compute::approximate_box;
/// use geo::Point;
///
/// let rect = approximate_box(&Point::new(0.0, 0.0), 222_000.0, 222_000.0);
/// assert!((rect.max().y - 1.0).abs() < 1e-9);
/// assert!((rect.min().x + 1.0).abs() < 1e-9);
/// ```
pub fn approximate_box(center: &Point, width_meters: f64, height_meters: f64) -> Rect {
    let (lon, lat) = (center.x(), center.y());
    let lat_delta = height_meters / (2.0 * METERS_PER_DEGREE);
    let mut lon_delta = width_meters / (2.0 * METERS_PER_DEGREE * lat.to_radians().cos());

    if !lon_delta.is_finite() || lon_delta < 0.0 {
        log::warn!(
            "Box longitude span degenerates at latitude {}; using all longitudes",
            lat
        );
        lon_delta = 360.0;
    }

    Rect::new(
        coord! { x: lon - lon_delta, y: lat - lat_delta },
        coord! { x: lon + lon_delta, y: lat + lat_delta },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_prefers_radius() {
        assert_eq!(
            ProximityQuery::from_parts(Some(5.0), Some(1.0), Some(1.0)),
            Some(ProximityQuery::radius(5.0))
        );
        assert_eq!(
            ProximityQuery::from_parts(None, Some(1.0), Some(2.0)),
            Some(ProximityQuery::rect(1.0, 2.0))
        );
        assert_eq!(ProximityQuery::from_parts(None, Some(1.0), None), None);
        assert_eq!(ProximityQuery::from_parts(None, None, None), None);
    }

    #[test]
    fn test_from_params_requires_exactly_one_mode() {
        assert!(ProximityQuery::from_params(Some(100.0), None, None).is_ok());
        assert!(ProximityQuery::from_params(None, Some(100.0), Some(50.0)).is_ok());

        for (r, w, h) in [
            (None, None, None),
            (None, Some(100.0), None),
            (None, None, Some(100.0)),
            (Some(100.0), Some(1.0), None),
            (Some(100.0), Some(1.0), Some(1.0)),
        ] {
            let err = ProximityQuery::from_params(r, w, h).unwrap_err();
            assert!(err.is_validation(), "{:?} {:?} {:?}", r, w, h);
        }

        assert!(ProximityQuery::from_params(Some(-1.0), None, None).is_err());
    }

    #[test]
    fn test_box_uses_center_latitude() {
        let center = Point::new(37.6173, 55.7558);
        let rect = approximate_box(&center, 2000.0, 2000.0);

        let lat_delta = 1000.0 / METERS_PER_DEGREE;
        let lon_delta = 1000.0 / (METERS_PER_DEGREE * 55.7558_f64.to_radians().cos());
        assert!((rect.max().y - (55.7558 + lat_delta)).abs() < 1e-12);
        assert!((rect.min().x - (37.6173 - lon_delta)).abs() < 1e-12);
        assert!(rect.width() > rect.height());
    }

    #[test]
    fn test_radius_envelope_contains_circle() {
        let center = Point::new(37.6173, 55.7558);
        let rect = radius_envelope(&center, 5000.0);

        // Points due north/east at exactly 5 km must fall inside the envelope.
        let north = Point::new(37.6173, 55.7558 + 5000.0 / 111_000.0);
        assert!(geodesic_distance(&center, &north) < 5100.0);
        assert!(rect.max().y > north.y());
        assert!(rect.min().x < center.x() && rect.max().x > center.x());
    }

    #[test]
    fn test_radius_envelope_at_pole_spans_all_longitudes() {
        let rect = radius_envelope(&Point::new(10.0, 89.99), 5000.0);
        assert_eq!(rect.min().x, -180.0);
        assert_eq!(rect.max().x, 180.0);
        assert_eq!(rect.max().y, 90.0);
    }

    #[test]
    fn test_radius_envelope_across_antimeridian() {
        let rect = radius_envelope(&Point::new(179.99, 0.0), 10_000.0);
        assert_eq!(rect.min().x, -180.0);
        assert_eq!(rect.max().x, 180.0);
    }
}
