//! Cycle protection for reparenting
//!
//! The descendant set is always computed from the full current item set of a
//! menu; nothing is cached between updates.

use std::collections::{HashMap, HashSet};

use nav_shared::{positive_id, RecordId};

use crate::domain::MenuItem;

/// Why a requested parent was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRejection {
    /// Unknown id or an item of another menu.
    NotInMenu,
    SelfParent,
    Descendant,
}

impl ParentRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParentRejection::NotInMenu => "not-in-menu",
            ParentRejection::SelfParent => "self-parent",
            ParentRejection::Descendant => "descendant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentDecision {
    Root,
    Parent(RecordId),
    /// The candidate was rejected and the item goes to the root level.
    ResetToRoot(ParentRejection),
}

impl ParentDecision {
    pub fn parent_id(&self) -> Option<RecordId> {
        match self {
            ParentDecision::Parent(id) => Some(*id),
            ParentDecision::Root | ParentDecision::ResetToRoot(_) => None,
        }
    }
}

/// Every id transitively parented under `root_id`, excluding `root_id`.
pub fn descendant_ids(items: &[MenuItem], root_id: RecordId) -> HashSet<RecordId> {
    let mut children: HashMap<RecordId, Vec<RecordId>> = HashMap::new();
    for item in items {
        if let Some(parent) = item.parent_id {
            children.entry(parent).or_default().push(item.id);
        }
    }

    let mut found = HashSet::new();
    let mut stack = vec![root_id];
    while let Some(current) = stack.pop() {
        if let Some(kids) = children.get(&current) {
            for &kid in kids {
                if kid != root_id && found.insert(kid) {
                    stack.push(kid);
                }
            }
        }
    }
    found
}

/// Decides the parent for `item_id` (`None` for a new item) among `items`,
/// which must be the current items of the item's menu.
pub fn decide_parent(
    items: &[MenuItem],
    item_id: Option<RecordId>,
    candidate: Option<RecordId>,
) -> ParentDecision {
    let Some(candidate) = positive_id(candidate) else {
        return ParentDecision::Root;
    };

    if !items.iter().any(|i| i.id == candidate) {
        return ParentDecision::ResetToRoot(ParentRejection::NotInMenu);
    }

    if let Some(item_id) = item_id {
        if candidate == item_id {
            return ParentDecision::ResetToRoot(ParentRejection::SelfParent);
        }
        if descendant_ids(items, item_id).contains(&candidate) {
            return ParentDecision::ResetToRoot(ParentRejection::Descendant);
        }
    }

    ParentDecision::Parent(candidate)
}
