use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller a request is made on behalf of.
///
/// Resolved by the host application's authentication layer and handed to
/// every service call, which checks it against the matching policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn id(&self) -> Uuid {
        self.user_id
    }
}
