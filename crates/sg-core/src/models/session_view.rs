use crate::{Identity, Profile};

use serde::{Deserialize, Serialize};

/// The single published output of reconciliation.
///
/// Derived, never mutated in place: the store recomputes and republishes a
/// fresh view on every relevant input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub loading: bool,
}

impl SessionView {
    /// The view before the first provider delivery has been applied.
    pub fn initial() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            identity: None,
            profile: None,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Guest sessions carry a profile with no backing identity.
    pub fn is_guest(&self) -> bool {
        self.identity.is_none() && self.profile.is_some()
    }
}

impl Default for SessionView {
    fn default() -> Self {
        Self::initial()
    }
}
