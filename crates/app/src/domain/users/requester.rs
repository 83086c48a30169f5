//! Authenticated requester.

use crate::domain::users::records::{Role, UserRecord, UserUuid};

/// The authenticated user behind a request.
///
/// Every service operation that needs an identity takes one of these rather than a raw
/// token, so authorization decisions never reach back into the identity store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

impl Requester {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this requester may read a resource owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: UserUuid) -> bool {
        self.is_admin() || self.uuid == owner
    }
}

impl From<UserRecord> for Requester {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}
