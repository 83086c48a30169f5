//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, Credentials, IssuedSession, MIN_PASSWORD_CHARS, NewRegistration,
        NewUser, SessionTokenVersion, format_session_token, generate_session_secret,
        hash_session_token,
        models::{NewSession, UserRow},
        parse_session_token,
        password::{hash_password, verify_password},
        repository::PgAuthRepository,
    },
    database::Db,
    domain::{
        users::{Requester, UserRecord, UserUuid},
        validation::{is_valid_email, non_blank},
    },
};

/// Default bearer session lifetime.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24 * 7);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, session_ttl: SignedDuration) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            session_ttl,
        }
    }

    async fn issue_session(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: UserRecord,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::Expiry)?;

        self.repository
            .create_session(
                tx,
                NewSession {
                    uuid: session_uuid,
                    user_uuid: user.uuid,
                    token_hash: hash_session_token(&token),
                    expires_at,
                },
            )
            .await?;

        Ok(IssuedSession {
            token,
            user,
            expires_at,
        })
    }
}

/// Trim and check a new account, lower-casing the email.
fn validate_new_user(user: NewUser) -> Result<NewUser, AuthServiceError> {
    let name = non_blank(&user.name).ok_or(AuthServiceError::BlankField("name"))?;
    let email = non_blank(&user.email).ok_or(AuthServiceError::BlankField("email"))?;
    let phone = non_blank(&user.phone).ok_or(AuthServiceError::BlankField("phone"))?;

    if user.password.trim().is_empty() {
        return Err(AuthServiceError::BlankField("password"));
    }

    if !is_valid_email(&email) {
        return Err(AuthServiceError::InvalidEmail);
    }

    if user.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthServiceError::WeakPassword {
            min: MIN_PASSWORD_CHARS,
        });
    }

    Ok(NewUser {
        name,
        email: email.to_lowercase(),
        phone,
        ..user
    })
}

fn into_row(user: NewUser) -> Result<UserRow, AuthServiceError> {
    let password_hash = hash_password(&user.password)?;

    Ok(UserRow {
        uuid: UserUuid::new(),
        name: user.name,
        email: user.email,
        password_hash,
        phone: user.phone,
        role: user.role,
    })
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<IssuedSession, AuthServiceError> {
        let row = into_row(validate_new_user(registration.into())?)?;

        let mut tx = self.db.begin().await?;

        let user = self.repository.create_user(&mut tx, row).await?;
        let session = self.issue_session(&mut tx, user).await?;

        tx.commit().await?;

        tracing::info!(user_uuid = %session.user.uuid, "user registered");

        Ok(session)
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let stored = self
            .repository
            .find_user_by_email(&mut tx, credentials.email.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password, &stored.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let session = self.issue_session(&mut tx, stored.user).await?;

        tx.commit().await?;

        Ok(session)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Requester, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|error| {
            tracing::debug!(error = %error, "rejected malformed bearer token");
            AuthServiceError::Unauthenticated
        })?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, &hash_session_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        tx.commit().await?;

        if session.uuid != parsed.session_uuid {
            return Err(AuthServiceError::Unauthenticated);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let touch_result = async {
            let mut tx = self.db.begin().await?;
            self.repository.touch_session(&mut tx, session.uuid).await?;
            tx.commit().await
        }
        .await;

        if let Err(error) = touch_result {
            tracing::warn!(error = %error, session_uuid = %session.uuid, "failed to touch session");
        }

        Ok(Requester::from(session.user))
    }

    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .revoke_session(&mut tx, &hash_session_token(bearer_token))
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::Unauthenticated);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        let row = into_row(validate_new_user(user)?)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, row).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer account and sign it in.
    async fn register(
        &self,
        registration: NewRegistration,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// Exchange email and password for a new session.
    async fn login(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the user behind it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Requester, AuthServiceError>;

    /// Revoke the session behind a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError>;

    /// Create an account with an explicit role, without signing it in.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError>;
}
