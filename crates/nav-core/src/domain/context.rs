//! Authenticated caller context

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nav_shared::ActorId;

/// Administrator on whose behalf a mutation runs. Authentication happens
/// upstream; the core only records who acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminContext {
    pub actor_id: ActorId,
}

impl AdminContext {
    pub fn new(actor_id: ActorId) -> Self {
        Self { actor_id }
    }

    /// Context for maintenance jobs and tests.
    pub fn system() -> Self {
        Self { actor_id: Uuid::nil() }
    }
}
