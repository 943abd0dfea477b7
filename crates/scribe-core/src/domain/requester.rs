use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller of a post operation.
///
/// Established upstream (token validation); trusted as-is by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: Uuid,
}

impl Requester {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}
