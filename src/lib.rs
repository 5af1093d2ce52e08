//! Embedded organization directory with an activity taxonomy and geospatial building search.
//!
//! ```rust
//! use orgdir::{Directory, Point, ProximityQuery};
//!
//! let mut dir = Directory::memory()?;
//! dir.seed_demo()?;
//!
//! let dairy = dir.search_organizations_by_activity("Молочная продукция")?;
//! assert_eq!(dairy.len(), 2);
//!
//! let center = Point::new(37.6173, 55.7558);
//! let nearby = dir.organizations_near(&center, ProximityQuery::radius(1_000.0))?;
//! assert!(nearby.iter().all(|org| org.building_id == nearby[0].building_id));
//! # Ok::<(), orgdir::DirectoryError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod db;
pub mod error;
pub mod storage;

pub use builder::DirectoryBuilder;
pub use compute::ProximityQuery;
pub use config::{Config, DirectoryStats};
pub use db::Directory;
pub use error::{DirectoryError, EntityKind, RequireNonEmpty, Result};

pub use geo::{Point, Rect};

pub use orgdir_types::activity::{Activity, ActivityNode};
pub use orgdir_types::building::Building;
pub use orgdir_types::ids::{ActivityId, BuildingId, OrganizationId, PhoneId};
pub use orgdir_types::organization::{NewOrganization, Organization, Phone};

#[cfg(feature = "snapshot")]
pub use storage::{SnapshotConfig, SnapshotFile};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Directory, DirectoryBuilder, DirectoryError, RequireNonEmpty, Result};

    pub use geo::{Point, Rect};

    pub use crate::{Config, ProximityQuery};

    pub use crate::{
        Activity, ActivityId, ActivityNode, Building, BuildingId, NewOrganization, Organization,
        OrganizationId,
    };
}
