//! Auth response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kusuri_app::domain::users::{Requester, UserRecord};

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// `customer` or `admin`
    pub role: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.uuid.into(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.to_string(),
        }
    }
}

impl From<&Requester> for UserResponse {
    fn from(requester: &Requester) -> Self {
        Self {
            id: requester.uuid.into(),
            name: requester.name.clone(),
            email: requester.email.clone(),
            phone: requester.phone.clone(),
            role: requester.role.to_string(),
        }
    }
}
