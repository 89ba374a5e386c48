use serde::{Deserialize, Serialize};

/// Authenticated actor handed to the engine by the identity layer.
///
/// The engine never verifies credentials itself; whoever constructs this value
/// vouches that `user_id` belongs to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: i64,
    username: String,
}

impl UserIdentity {
    /// Creates an identity from an already-authenticated user id.
    #[must_use]
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }

    /// Returns the numeric user id the identity layer resolved.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the login name, used for log context only.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}
