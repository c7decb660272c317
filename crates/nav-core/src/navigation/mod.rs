//! Pure navigation algorithms: slugs, trees, and reparent checks

pub mod reparent;
pub mod slug;
pub mod tree;

pub use reparent::{decide_parent, descendant_ids, ParentDecision, ParentRejection};
pub use tree::{build, flatten, flatten_items, MenuNode};
