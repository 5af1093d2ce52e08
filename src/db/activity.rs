//! Activity taxonomy: depth-checked creation and descendant expansion.

use super::{Directory, DirectoryInner};
use crate::compute::validation::validate_name;
use crate::error::{DirectoryError, EntityKind, Result};
use orgdir_types::activity::{Activity, ActivityNode};
use orgdir_types::ids::ActivityId;
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};

impl Directory {
    /// Create an activity, optionally under a parent.
    ///
    /// Fails with `Validation` when the parent already sits at the maximum
    /// depth (3 by default), and with `NotFound` when the parent does not
    /// exist. Nothing is inserted on failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use orgdir::Directory;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut dir = Directory::memory()?;
    /// let cars = dir.create_activity("Cars", None)?;
    /// let passenger = dir.create_activity("Passenger", Some(cars.id))?;
    /// let parts = dir.create_activity("Parts", Some(passenger.id))?;
    ///
    /// // A fourth level is rejected
    /// assert!(dir.create_activity("Tyres", Some(parts.id)).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn create_activity(
        &mut self,
        name: impl Into<String>,
        parent_id: Option<ActivityId>,
    ) -> Result<Activity> {
        self.inner.ensure_open()?;
        let name = name.into();
        validate_name("activity", &name)?;

        if let Some(parent_id) = parent_id {
            if !self.inner.tables.activities.contains_key(&parent_id) {
                return Err(DirectoryError::not_found(EntityKind::Activity, parent_id));
            }

            let parent_depth = self.inner.activity_depth(parent_id);
            let max_depth = self.inner.config.max_activity_depth;
            if parent_depth >= max_depth {
                return Err(DirectoryError::Validation(format!(
                    "activity nesting exceeds maximum depth of {} (parent {} is at depth {})",
                    max_depth, parent_id, parent_depth
                )));
            }
        }

        let inner = &mut self.inner;
        let id = inner.tables.sequences.next_activity();
        let activity = Activity::new(id, name, parent_id);
        inner.indexes.add_activity(&activity);
        inner.tables.activities.insert(id, activity.clone());
        log::debug!("Created activity {} ({:?})", id, activity.name);

        inner.record_write();
        Ok(activity)
    }

    /// Depth of an activity counted from its root (root = 1).
    ///
    /// Returns 0 when the activity does not exist.
    pub fn activity_depth(&self, id: ActivityId) -> Result<usize> {
        self.inner.ensure_open()?;
        Ok(self.inner.activity_depth(id))
    }

    /// The activity plus every activity below it.
    ///
    /// A leaf yields just itself; an unknown id yields an empty set.
    pub fn activity_descendants(&self, id: ActivityId) -> Result<BTreeSet<ActivityId>> {
        self.inner.ensure_open()?;
        Ok(self.inner.activity_descendants(id))
    }

    /// Exact, case-sensitive name lookup. The lowest id wins on duplicates.
    pub fn find_activity_by_name(&self, name: &str) -> Result<Option<Activity>> {
        self.inner.ensure_open()?;
        Ok(self.inner.find_activity_by_name(name).cloned())
    }

    pub fn activity(&self, id: ActivityId) -> Result<Activity> {
        self.inner.ensure_open()?;
        self.inner
            .tables
            .activities
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Activity, id))
    }

    /// All activities ordered by id.
    pub fn activities(&self) -> Result<Vec<Activity>> {
        self.inner.ensure_open()?;
        Ok(self.inner.tables.activities.values().cloned().collect())
    }

    /// Direct children of an activity, ordered by id.
    pub fn activity_children(&self, id: ActivityId) -> Result<Vec<Activity>> {
        self.inner.ensure_open()?;
        let tables = &self.inner.tables;
        Ok(self
            .inner
            .indexes
            .children_of(id)
            .filter_map(|child| tables.activities.get(&child).cloned())
            .collect())
    }

    /// Nested rendering of the subtree rooted at `id`.
    pub fn activity_tree(&self, id: ActivityId) -> Result<ActivityNode> {
        self.inner.ensure_open()?;
        let mut visited = FxHashSet::default();
        self.inner
            .build_node(id, &mut visited)
            .ok_or_else(|| DirectoryError::not_found(EntityKind::Activity, id))
    }

    /// One nested tree per root activity, ordered by root id.
    pub fn activity_forest(&self) -> Result<Vec<ActivityNode>> {
        self.inner.ensure_open()?;
        let mut visited = FxHashSet::default();
        let roots: Vec<ActivityId> = self
            .inner
            .tables
            .activities
            .values()
            .filter(|activity| activity.is_root())
            .map(|activity| activity.id)
            .collect();

        Ok(roots
            .into_iter()
            .filter_map(|root| self.inner.build_node(root, &mut visited))
            .collect())
    }
}

impl DirectoryInner {
    pub(crate) fn activity_depth(&self, id: ActivityId) -> usize {
        let activities = &self.tables.activities;
        let mut visited = FxHashSet::default();
        let mut depth = 0;
        let mut current = Some(id);

        while let Some(node_id) = current {
            let Some(activity) = activities.get(&node_id) else {
                break;
            };
            if !visited.insert(node_id) {
                log::warn!("Activity parent chain starting at {} contains a cycle", id);
                break;
            }
            depth += 1;
            current = activity.parent_id;
        }

        depth
    }

    pub(crate) fn activity_descendants(&self, id: ActivityId) -> BTreeSet<ActivityId> {
        let mut found = BTreeSet::new();
        if !self.tables.activities.contains_key(&id) {
            return found;
        }

        let mut queue = VecDeque::from([id]);
        while let Some(node_id) = queue.pop_front() {
            if !found.insert(node_id) {
                continue;
            }
            queue.extend(
                self.indexes
                    .children_of(node_id)
                    .filter(|child| !found.contains(child)),
            );
        }

        found
    }

    pub(crate) fn find_activity_by_name(&self, name: &str) -> Option<&Activity> {
        self.tables
            .activities
            .values()
            .find(|activity| activity.name == name)
    }

    fn build_node(
        &self,
        id: ActivityId,
        visited: &mut FxHashSet<ActivityId>,
    ) -> Option<ActivityNode> {
        let activity = self.tables.activities.get(&id)?;
        if !visited.insert(id) {
            log::warn!("Skipping activity {} already rendered in this tree", id);
            return None;
        }

        let children = self
            .indexes
            .children_of(id)
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|child| self.build_node(child, visited))
            .collect();

        Some(ActivityNode {
            activity: activity.clone(),
            children,
        })
    }
}
