use sg_core::{AttemptToken, Identity, Profile};
use sg_profile::ProfileResult;

/// Inputs to the store actor.
///
/// Commands are processed one at a time, run to completion, which is what
/// makes the store's invariants hold without locks: no two mutations ever
/// interleave mid-operation.
#[derive(Debug)]
pub enum SessionCommand {
    /// The provider reported a new current identity (or none).
    IdentityChanged(Option<Identity>),
    /// Caller set or cleared the guest/demo override.
    SetGuestOverride(Option<Profile>),
    /// A reconcile attempt finished; honored only if its token is still
    /// the live one.
    AttemptResolved {
        token: AttemptToken,
        result: ProfileResult<Profile>,
    },
    /// A reconcile attempt outlived its deadline.
    AttemptTimedOut { token: AttemptToken },
    /// Caller-driven reset: clear the terminal-failure latch and, if an
    /// identity is waiting without a profile, try again.
    ResetRegistration,
}
