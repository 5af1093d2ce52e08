//! Buildings and the geospatial query engine.

use super::{Directory, DirectoryInner};
use crate::compute::spatial::{ProximityQuery, approximate_box};
use crate::compute::validation::{validate_distance, validate_geographic_point, validate_name};
use crate::error::{DirectoryError, EntityKind, Result};
use geo::Point;
use orgdir_types::building::Building;
use orgdir_types::ids::BuildingId;

impl Directory {
    /// Insert a building with automatic spatial indexing.
    ///
    /// # Arguments
    ///
    /// * `address` - Free-text address
    /// * `latitude` - WGS84 latitude in degrees
    /// * `longitude` - WGS84 longitude in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orgdir::Directory;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut dir = Directory::memory()?;
    /// let b = dir.create_building("32/1 Blyukhera St", 55.7935, 37.7015)?;
    /// assert_eq!(dir.building(b.id)?.latitude(), 55.7935);
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_building(
        &mut self,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Building> {
        self.inner.ensure_open()?;
        let address = address.into();
        validate_name("building address", &address)?;
        self.inner.check_point(&Point::new(longitude, latitude))?;

        let inner = &mut self.inner;
        let id = inner.tables.sequences.next_building();
        let building = Building::new(id, address, latitude, longitude);
        inner.indexes.locations.insert(id, &building.location);
        inner.tables.buildings.insert(id, building.clone());
        log::debug!(
            "Created building {} at ({}, {})",
            id,
            building.latitude(),
            building.longitude()
        );

        inner.record_write();
        Ok(building)
    }

    pub fn building(&self, id: BuildingId) -> Result<Building> {
        self.inner.ensure_open()?;
        self.inner.building(id).cloned()
    }

    /// All buildings ordered by id.
    pub fn buildings(&self) -> Result<Vec<Building>> {
        self.inner.ensure_open()?;
        Ok(self.inner.tables.buildings.values().cloned().collect())
    }

    /// Buildings within `radius_meters` geodesic distance of `center`.
    ///
    /// Results are ordered by distance from the center.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orgdir::{Directory, Point};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut dir = Directory::memory()?;
    /// dir.create_building("1 Lenina St", 55.7558, 37.6173)?;
    /// dir.create_building("32/1 Blyukhera St", 55.7935, 37.7015)?;
    ///
    /// let center = Point::new(37.6173, 55.7558);
    /// assert_eq!(dir.buildings_within_radius(&center, 1_000.0)?.len(), 1);
    /// assert_eq!(dir.buildings_within_radius(&center, 10_000.0)?.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn buildings_within_radius(
        &self,
        center: &Point,
        radius_meters: f64,
    ) -> Result<Vec<Building>> {
        self.inner.ensure_open()?;
        self.inner.check_point(center)?;
        validate_distance("radius", radius_meters)?;
        Ok(self.inner.buildings_within_radius(center, radius_meters))
    }

    /// Buildings inside a `width` × `height` meter box centered on `center`.
    ///
    /// The box is converted to degrees at the center latitude
    /// (see [`approximate_box`]); it is not a geodesic rectangle.
    pub fn buildings_within_box(
        &self,
        center: &Point,
        width_meters: f64,
        height_meters: f64,
    ) -> Result<Vec<Building>> {
        self.inner.ensure_open()?;
        self.inner.check_point(center)?;
        validate_distance("width", width_meters)?;
        validate_distance("height", height_meters)?;
        Ok(self
            .inner
            .buildings_within_box(center, width_meters, height_meters))
    }

    /// Buildings matching either proximity mode.
    pub fn buildings_near(&self, center: &Point, query: ProximityQuery) -> Result<Vec<Building>> {
        self.inner.ensure_open()?;
        self.inner.check_point(center)?;
        query.validate()?;
        Ok(self.inner.buildings_near(center, Some(query)))
    }
}

impl DirectoryInner {
    pub(crate) fn building(&self, id: BuildingId) -> Result<&Building> {
        self.tables
            .buildings
            .get(&id)
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Building, id))
    }

    pub(crate) fn check_point(&self, point: &Point) -> Result<()> {
        if self.config.validate_coordinates {
            validate_geographic_point(point)?;
        } else if !point.x().is_finite() || !point.y().is_finite() {
            return Err(DirectoryError::Validation(format!(
                "Coordinates must be finite, got: ({}, {})",
                point.y(),
                point.x()
            )));
        }
        Ok(())
    }

    fn buildings_within_radius(&self, center: &Point, radius_meters: f64) -> Vec<Building> {
        self.indexes
            .locations
            .within_radius(center, radius_meters)
            .into_iter()
            .filter_map(|(id, _distance)| self.tables.buildings.get(&id).cloned())
            .collect()
    }

    fn buildings_within_box(
        &self,
        center: &Point,
        width_meters: f64,
        height_meters: f64,
    ) -> Vec<Building> {
        let rect = approximate_box(center, width_meters, height_meters);
        self.indexes
            .locations
            .within_rect(&rect)
            .into_iter()
            .filter_map(|id| self.tables.buildings.get(&id).cloned())
            .collect()
    }

    /// One mode per call; no mode yields no buildings.
    pub(crate) fn buildings_near(
        &self,
        center: &Point,
        query: Option<ProximityQuery>,
    ) -> Vec<Building> {
        match query {
            Some(ProximityQuery::Radius { meters }) => {
                self.buildings_within_radius(center, meters)
            }
            Some(ProximityQuery::Box { width, height }) => {
                self.buildings_within_box(center, width, height)
            }
            None => Vec::new(),
        }
    }
}
