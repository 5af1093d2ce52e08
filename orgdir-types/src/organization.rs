use crate::activity::Activity;
use crate::building::Building;
use crate::ids::{ActivityId, BuildingId, OrganizationId, PhoneId};
use serde::{Deserialize, Serialize};

/// A phone number owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub id: PhoneId,
    pub organization_id: OrganizationId,
    pub phone: String,
}

/// Request to create an organization.
///
/// # Examples
///
/// ```
/// use orgdir_types::organization::NewOrganization;
/// use orgdir_types::ids::{ActivityId, BuildingId};
///
/// let req = NewOrganization::new("Horns & Hooves", BuildingId(1))
///     .with_phones(["2-222-222", "3-333-333"])
///     .with_activities([ActivityId(2), ActivityId(3)]);
/// assert_eq!(req.phones.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub building_id: BuildingId,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub activity_ids: Vec<ActivityId>,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>, building_id: BuildingId) -> Self {
        Self {
            name: name.into(),
            building_id,
            phones: Vec::new(),
            activity_ids: Vec::new(),
        }
    }

    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones.extend(phones.into_iter().map(Into::into));
        self
    }

    pub fn with_activities<I>(mut self, activity_ids: I) -> Self
    where
        I: IntoIterator<Item = ActivityId>,
    {
        self.activity_ids.extend(activity_ids);
        self
    }
}

/// A fully-populated organization as returned by every directory read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
    pub building: Building,
    pub phones: Vec<String>,
    pub activities: Vec<Activity>,
}

impl Organization {
    pub fn activity_ids(&self) -> Vec<ActivityId> {
        self.activities.iter().map(|a| a.id).collect()
    }

    pub fn has_activity(&self, id: ActivityId) -> bool {
        self.activities.iter().any(|a| a.id == id)
    }
}
