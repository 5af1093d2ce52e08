//! # orgdir-types
//!
//! Record types shared by the orgdir directory and its callers.
//!
//! - **Identifiers**: `ActivityId`, `BuildingId`, `OrganizationId`, `PhoneId`
//! - **Activities**: `Activity`, `ActivityNode`
//! - **Buildings**: `Building`
//! - **Organizations**: `Organization`, `NewOrganization`, `Phone`
//!
//! All records are serializable with Serde in the shapes the directory exposes
//! to its HTTP boundary. Building locations are `geo::Point`s with
//! `x = longitude` and `y = latitude`.
//!
//! ## Examples
//!
//! ```rust
//! use orgdir_types::building::Building;
//! use orgdir_types::ids::BuildingId;
//!
//! let building = Building::new(BuildingId(1), "1 Lenina St", 55.7558, 37.6173);
//! assert_eq!(building.latitude(), 55.7558);
//! assert_eq!(building.longitude(), 37.6173);
//! ```

pub mod activity;
pub mod building;
pub mod ids;
pub mod organization;
