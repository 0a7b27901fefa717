use uuid::Uuid;

/// Unique tag per reconcile attempt.
///
/// Async completions carry the token they were issued under; the store
/// discards any completion whose token no longer matches the current
/// attempt, which is how results of superseded attempts are kept out of
/// the published view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptToken(Uuid);

impl AttemptToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttemptToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
