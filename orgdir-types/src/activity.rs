use crate::ids::ActivityId;
use serde::{Deserialize, Serialize};

/// A node in the activity taxonomy.
///
/// Activities form a forest: an activity without a `parent_id` is a root.
///
/// # Examples
///
/// ```
/// use orgdir_types::activity::Activity;
/// use orgdir_types::ids::ActivityId;
///
/// let food = Activity::new(ActivityId(1), "Food", None);
/// let meat = Activity::new(ActivityId(2), "Meat", Some(food.id));
/// assert!(food.is_root());
/// assert_eq!(meat.parent_id, Some(ActivityId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub parent_id: Option<ActivityId>,
}

impl Activity {
    pub fn new(id: ActivityId, name: impl Into<String>, parent_id: Option<ActivityId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// An activity together with its nested sub-activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityNode {
    #[serde(flatten)]
    pub activity: Activity,
    #[serde(default)]
    pub children: Vec<ActivityNode>,
}

impl ActivityNode {
    pub fn leaf(activity: Activity) -> Self {
        Self {
            activity,
            children: Vec::new(),
        }
    }

    /// Number of levels in this subtree, counting the node itself.
    pub fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ActivityNode::height)
            .max()
            .unwrap_or(0)
    }

    /// Ids of every node in the subtree, in depth-first order.
    pub fn ids(&self) -> Vec<ActivityId> {
        let mut out = vec![self.activity.id];
        for child in &self.children {
            out.extend(child.ids());
        }
        out
    }
}
