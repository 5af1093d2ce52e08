//! Organization façade: writes with cascade, and fully-populated reads.

use super::tables::OrganizationRow;
use super::{Directory, DirectoryInner};
use crate::compute::spatial::ProximityQuery;
use crate::compute::validation::validate_name;
use crate::error::{DirectoryError, EntityKind, Result};
use geo::Point;
use orgdir_types::ids::{ActivityId, BuildingId, OrganizationId};
use orgdir_types::organization::{NewOrganization, Organization, Phone};
use std::collections::BTreeSet;

impl Directory {
    /// Create an organization with its phones and activity links.
    ///
    /// The building and every activity must exist. All checks run before
    /// anything is written, so a failed call leaves no partial rows.
    /// Duplicate activity ids collapse into one link.
    pub fn create_organization(&mut self, request: NewOrganization) -> Result<Organization> {
        self.inner.ensure_open()?;
        validate_name("organization", &request.name)?;
        self.inner.building(request.building_id)?;

        let activity_ids: BTreeSet<ActivityId> = request.activity_ids.iter().copied().collect();
        if let Some(missing) = activity_ids
            .iter()
            .find(|id| !self.inner.tables.activities.contains_key(*id))
        {
            return Err(DirectoryError::not_found(EntityKind::Activity, *missing));
        }

        let inner = &mut self.inner;
        let org_id = inner.tables.sequences.next_organization();
        inner.tables.organizations.insert(
            org_id,
            OrganizationRow {
                id: org_id,
                name: request.name,
                building_id: request.building_id,
            },
        );
        inner
            .indexes
            .building_organizations
            .entry(request.building_id)
            .or_default()
            .insert(org_id);

        for number in request.phones {
            let phone_id = inner.tables.sequences.next_phone();
            inner.tables.phones.insert(
                phone_id,
                Phone {
                    id: phone_id,
                    organization_id: org_id,
                    phone: number,
                },
            );
            inner
                .indexes
                .organization_phones
                .entry(org_id)
                .or_default()
                .push(phone_id);
        }

        for activity_id in activity_ids {
            inner.tables.organization_activities.insert((org_id, activity_id));
            inner.indexes.activity_organizations.insert((activity_id, org_id));
        }

        log::debug!("Created organization {}", org_id);
        inner.record_write();
        inner.load_organization(org_id)
    }

    /// Delete an organization together with its phones and activity links.
    ///
    /// Returns the record as it was before deletion.
    pub fn delete_organization(&mut self, id: OrganizationId) -> Result<Organization> {
        self.inner.ensure_open()?;
        let removed = self.inner.load_organization(id)?;

        let inner = &mut self.inner;
        inner.tables.organizations.remove(&id);
        if let Some(orgs) = inner
            .indexes
            .building_organizations
            .get_mut(&removed.building_id)
        {
            orgs.remove(&id);
        }

        for phone_id in inner.indexes.organization_phones.remove(&id).unwrap_or_default() {
            inner.tables.phones.remove(&phone_id);
        }

        for activity_id in removed.activity_ids() {
            inner.tables.organization_activities.remove(&(id, activity_id));
            inner.indexes.activity_organizations.remove(&(activity_id, id));
        }

        log::debug!("Deleted organization {} with its phones and links", id);
        inner.record_write();
        Ok(removed)
    }

    /// Fetch one organization by id.
    pub fn organization(&self, id: OrganizationId) -> Result<Organization> {
        self.inner.ensure_open()?;
        self.inner.load_organization(id)
    }

    /// All organizations ordered by id.
    pub fn organizations(&self) -> Result<Vec<Organization>> {
        self.inner.ensure_open()?;
        self.inner
            .load_organizations(self.inner.tables.organizations.keys().copied())
    }

    /// Case-insensitive substring search over organization names.
    ///
    /// ```rust
    /// use orgdir::Directory;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut dir = Directory::memory()?;
    /// dir.seed_demo()?;
    /// let found = dir.search_organizations_by_name("сервис")?;
    /// assert_eq!(found[0].name, "АвтоСервис");
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_organizations_by_name(&self, fragment: &str) -> Result<Vec<Organization>> {
        self.inner.ensure_open()?;
        let needle = fragment.to_lowercase();
        let ids: Vec<OrganizationId> = self
            .inner
            .tables
            .organizations
            .values()
            .filter(|row| row.name.to_lowercase().contains(&needle))
            .map(|row| row.id)
            .collect();
        self.inner.load_organizations(ids)
    }

    /// Organizations located in one building.
    pub fn organizations_in_building(&self, building_id: BuildingId) -> Result<Vec<Organization>> {
        self.inner.ensure_open()?;
        let ids: Vec<OrganizationId> = self
            .inner
            .indexes
            .building_organizations
            .get(&building_id)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        self.inner.load_organizations(ids)
    }

    /// Organizations linked to exactly this activity (sub-activities excluded).
    pub fn organizations_by_activity(&self, activity_id: ActivityId) -> Result<Vec<Organization>> {
        self.inner.ensure_open()?;
        let ids: Vec<OrganizationId> = self
            .inner
            .indexes
            .organizations_for_activity(activity_id)
            .collect();
        self.inner.load_organizations(ids)
    }

    /// Organizations linked to the named activity or any activity below it.
    ///
    /// The name must match exactly; an unknown name yields an empty list.
    pub fn search_organizations_by_activity(&self, activity_name: &str) -> Result<Vec<Organization>> {
        self.inner.ensure_open()?;
        let Some(root) = self.inner.find_activity_by_name(activity_name) else {
            return Ok(Vec::new());
        };

        let descendants = self.inner.activity_descendants(root.id);
        let ids: BTreeSet<OrganizationId> = descendants
            .iter()
            .flat_map(|activity_id| self.inner.indexes.organizations_for_activity(*activity_id))
            .collect();
        self.inner.load_organizations(ids)
    }

    /// Organizations housed in any building matching the proximity query.
    pub fn organizations_near(
        &self,
        center: &Point,
        query: ProximityQuery,
    ) -> Result<Vec<Organization>> {
        self.inner.ensure_open()?;
        self.inner.check_point(center)?;
        query.validate()?;
        self.inner.organizations_near(center, Some(query))
    }

    /// Proximity search from raw request parameters.
    ///
    /// Exactly one of `radius` or `width` + `height` must be given;
    /// anything else is a `Validation` error.
    ///
    /// ```rust
    /// use orgdir::{Directory, Point};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut dir = Directory::memory()?;
    /// dir.seed_demo()?;
    /// let center = Point::new(37.6173, 55.7558);
    ///
    /// assert_eq!(dir.near(&center, Some(1_000.0), None, None)?.len(), 2);
    /// assert!(dir.near(&center, None, Some(100.0), None).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn near(
        &self,
        center: &Point,
        radius: Option<f64>,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<Vec<Organization>> {
        let query = ProximityQuery::from_params(radius, width, height)?;
        self.organizations_near(center, query)
    }
}

impl DirectoryInner {
    pub(crate) fn load_organization(&self, id: OrganizationId) -> Result<Organization> {
        let row = self
            .tables
            .organizations
            .get(&id)
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Organization, id))?;
        let building = self.building(row.building_id)?.clone();

        let phones = self
            .indexes
            .organization_phones
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|phone_id| self.tables.phones.get(phone_id))
            .map(|phone| phone.phone.clone())
            .collect();

        let activities = self
            .tables
            .activities_for_organization(id)
            .filter_map(|activity_id| self.tables.activities.get(&activity_id).cloned())
            .collect();

        Ok(Organization {
            id: row.id,
            name: row.name.clone(),
            building_id: row.building_id,
            building,
            phones,
            activities,
        })
    }

    /// Load organizations in id order, once each.
    pub(crate) fn load_organizations<I>(&self, ids: I) -> Result<Vec<Organization>>
    where
        I: IntoIterator<Item = OrganizationId>,
    {
        let ids: BTreeSet<OrganizationId> = ids.into_iter().collect();
        ids.into_iter()
            .map(|id| self.load_organization(id))
            .collect()
    }

    pub(crate) fn organizations_near(
        &self,
        center: &Point,
        query: Option<ProximityQuery>,
    ) -> Result<Vec<Organization>> {
        let ids: BTreeSet<OrganizationId> = self
            .buildings_near(center, query)
            .iter()
            .filter_map(|building| self.indexes.building_organizations.get(&building.id))
            .flatten()
            .copied()
            .collect();
        self.load_organizations(ids)
    }
}
