use crate::ids::BuildingId;
use geo::Point;
use serde::{Deserialize, Serialize};

/// A building with a free-text address and a WGS84 location.
///
/// The location is stored as a single `geo::Point` (`x` = longitude,
/// `y` = latitude) and serialized as separate `latitude` / `longitude` fields.
///
/// # Examples
///
/// ```
/// use orgdir_types::building::Building;
/// use orgdir_types::ids::BuildingId;
///
/// let b = Building::new(BuildingId(2), "32/1 Blyukhera St", 55.7935, 37.7015);
/// let json = serde_json::to_value(&b).unwrap();
/// assert_eq!(json["latitude"], 55.7935);
/// assert_eq!(json["longitude"], 37.7015);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "BuildingRecord", from = "BuildingRecord")]
pub struct Building {
    pub id: BuildingId,
    pub address: String,
    pub location: Point<f64>,
}

impl Building {
    pub fn new(id: BuildingId, address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            address: address.into(),
            location: Point::new(longitude, latitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

/// Wire shape of a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub id: BuildingId,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Building> for BuildingRecord {
    fn from(b: Building) -> Self {
        Self {
            id: b.id,
            latitude: b.latitude(),
            longitude: b.longitude(),
            address: b.address,
        }
    }
}

impl From<BuildingRecord> for Building {
    fn from(r: BuildingRecord) -> Self {
        Building::new(r.id, r.address, r.latitude, r.longitude)
    }
}
