//! Validation for geographic coordinates, distances and names.

use crate::error::{DirectoryError, Result};
use geo::Point;

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use orgdir::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// // Red Square
/// let moscow = Point::new(37.6173, 55.7558);
/// assert!(validate_geographic_point(&moscow).is_ok());
///
/// // Invalid longitude
/// let invalid = Point::new(200.0, 40.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(DirectoryError::Validation(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(DirectoryError::Validation(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(DirectoryError::Validation(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(DirectoryError::Validation(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Validates a distance in meters (radius, width or height).
pub fn validate_distance(label: &str, meters: f64) -> Result<()> {
    if !meters.is_finite() {
        return Err(DirectoryError::Validation(format!(
            "{} must be finite, got: {}",
            label, meters
        )));
    }

    if meters < 0.0 {
        return Err(DirectoryError::Validation(format!(
            "{} must not be negative, got: {}",
            label, meters
        )));
    }

    Ok(())
}

/// Rejects empty or whitespace-only names.
pub fn validate_name(label: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DirectoryError::Validation(format!(
            "{} name must not be empty",
            label
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        let moscow = Point::new(37.6173, 55.7558);
        assert!(validate_geographic_point(&moscow).is_ok());

        let max_lon = Point::new(180.0, 0.0);
        assert!(validate_geographic_point(&max_lon).is_ok());

        let min_lat = Point::new(0.0, -90.0);
        assert!(validate_geographic_point(&min_lat).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(f64::NAN, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_distances() {
        assert!(validate_distance("radius", 0.0).is_ok());
        assert!(validate_distance("radius", 1500.0).is_ok());
        assert!(validate_distance("width", -1.0).is_err());
        assert!(validate_distance("height", f64::NAN).is_err());
    }

    #[test]
    fn test_names() {
        assert!(validate_name("activity", "Food").is_ok());
        assert!(validate_name("activity", "  ").unwrap_err().is_validation());
    }
}
