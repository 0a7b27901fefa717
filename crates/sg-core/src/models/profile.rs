use crate::{Identity, Role};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The backend's persisted record for an identity.
///
/// Everything beyond `id` and `role` is opaque to the gateway and carried
/// through unchanged in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub role: Role,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Profile {
    pub fn new(id: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            role,
            attributes: Map::new(),
        }
    }

    /// A locally-synthesized guest profile, not backed by any identity.
    pub fn guest(id: &str) -> Self {
        Self::new(id, Role::Guest)
    }

    pub fn matches_identity(&self, identity: &Identity) -> bool {
        self.id == identity.id
    }
}
