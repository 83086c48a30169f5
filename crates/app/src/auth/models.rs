//! Auth data models.

use jiff::Timestamp;

use crate::domain::users::{Role, UserRecord, UserUuid};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Self-service sign-up. Always creates a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

/// Account created by an operator, with an explicit role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

impl From<NewRegistration> for NewUser {
    fn from(registration: NewRegistration) -> Self {
        Self {
            name: registration.name,
            email: registration.email,
            password: registration.password,
            phone: registration.phone,
            role: Role::Customer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A freshly issued bearer token. The raw token is only ever returned here.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: UserRecord,
    pub expires_at: Timestamp,
}

/// Validated account data with the password already hashed.
#[derive(Debug, Clone)]
pub(crate) struct UserRow {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: Role,
}

/// Stored account together with its password hash, used for login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: uuid::Uuid,
    pub user_uuid: UserUuid,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// A live session and the user it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub uuid: uuid::Uuid,
    pub user: UserRecord,
}
