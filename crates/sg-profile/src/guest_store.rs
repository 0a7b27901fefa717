use crate::ProfileResult;

use sg_core::Profile;

/// Key-value persistence for the guest-override profile, so a demo
/// session survives a process restart.
pub trait GuestStore: Send + Sync {
    fn load(&self) -> ProfileResult<Option<Profile>>;
    fn save(&self, profile: &Profile) -> ProfileResult<()>;
    fn clear(&self) -> ProfileResult<()>;
}
