//! Arena tables and the lookup indexes derived from them.
//!
//! `Tables` is the persisted state: plain rows keyed by id plus the id
//! sequences. `Indexes` is rebuilt from `Tables` on load and kept in step by
//! every write, so it never needs to be stored.

use crate::compute::BuildingIndex;
use orgdir_types::activity::Activity;
use orgdir_types::building::Building;
use orgdir_types::ids::{ActivityId, BuildingId, OrganizationId, PhoneId};
use orgdir_types::organization::Phone;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stored organization row; phones and activity links live in their own tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct OrganizationRow {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
}

/// Last id handed out per table. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Sequences {
    activity: u64,
    building: u64,
    organization: u64,
    phone: u64,
}

impl Sequences {
    pub fn next_activity(&mut self) -> ActivityId {
        self.activity += 1;
        ActivityId(self.activity)
    }

    pub fn next_building(&mut self) -> BuildingId {
        self.building += 1;
        BuildingId(self.building)
    }

    pub fn next_organization(&mut self) -> OrganizationId {
        self.organization += 1;
        OrganizationId(self.organization)
    }

    pub fn next_phone(&mut self) -> PhoneId {
        self.phone += 1;
        PhoneId(self.phone)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tables {
    pub activities: BTreeMap<ActivityId, Activity>,
    pub buildings: BTreeMap<BuildingId, Building>,
    pub organizations: BTreeMap<OrganizationId, OrganizationRow>,
    pub phones: BTreeMap<PhoneId, Phone>,
    /// Join table keyed by `(organization_id, activity_id)`
    pub organization_activities: BTreeSet<(OrganizationId, ActivityId)>,
    pub sequences: Sequences,
}

#[derive(Debug, Default)]
pub(crate) struct Indexes {
    /// Parent id -> child ids
    pub children: FxHashMap<ActivityId, BTreeSet<ActivityId>>,
    /// Reverse of the join table
    pub activity_organizations: BTreeSet<(ActivityId, OrganizationId)>,
    pub building_organizations: FxHashMap<BuildingId, BTreeSet<OrganizationId>>,
    pub organization_phones: FxHashMap<OrganizationId, Vec<PhoneId>>,
    pub locations: BuildingIndex,
}

impl Indexes {
    pub fn rebuild(tables: &Tables) -> Self {
        let mut indexes = Indexes {
            locations: BuildingIndex::bulk_load(
                tables
                    .buildings
                    .values()
                    .map(|building| (building.id, building.location)),
            ),
            ..Default::default()
        };

        for activity in tables.activities.values() {
            indexes.add_activity(activity);
        }
        for org in tables.organizations.values() {
            indexes
                .building_organizations
                .entry(org.building_id)
                .or_default()
                .insert(org.id);
        }
        for phone in tables.phones.values() {
            indexes
                .organization_phones
                .entry(phone.organization_id)
                .or_default()
                .push(phone.id);
        }
        for &(org_id, activity_id) in &tables.organization_activities {
            indexes.activity_organizations.insert((activity_id, org_id));
        }

        indexes
    }

    pub fn add_activity(&mut self, activity: &Activity) {
        if let Some(parent_id) = activity.parent_id {
            self.children.entry(parent_id).or_default().insert(activity.id);
        }
    }

    pub fn children_of(&self, id: ActivityId) -> impl Iterator<Item = ActivityId> + '_ {
        self.children.get(&id).into_iter().flatten().copied()
    }

    /// Organizations linked to `activity_id`, ascending.
    pub fn organizations_for_activity(
        &self,
        activity_id: ActivityId,
    ) -> impl Iterator<Item = OrganizationId> + '_ {
        self.activity_organizations
            .range((activity_id, OrganizationId(0))..=(activity_id, OrganizationId(u64::MAX)))
            .map(|&(_, org_id)| org_id)
    }
}

impl Tables {
    /// Activity ids linked to `org_id`, ascending.
    pub fn activities_for_organization(
        &self,
        org_id: OrganizationId,
    ) -> impl Iterator<Item = ActivityId> + '_ {
        self.organization_activities
            .range((org_id, ActivityId(0))..=(org_id, ActivityId(u64::MAX)))
            .map(|&(_, activity_id)| activity_id)
    }
}
