use serde::{Deserialize, Serialize};
use warden_core::UserIdentity;

use crate::id::integer_id;

integer_id! {
    /// Identifier of a user account.
    UserId
}

impl From<&UserIdentity> for UserId {
    fn from(identity: &UserIdentity) -> Self {
        Self::new(identity.user_id())
    }
}

/// Marks a user as holding unconditional access.
///
/// The mark is provisioned out-of-band and only ever read by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuperuserMark {
    /// Marked user.
    pub user_id: UserId,
}
