//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        contact::{ContactService, RelayContactService},
        feedback::{FeedbackService, PgFeedbackService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
    notifications::Notifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// Settings needed to assemble the services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub session_ttl: SignedDuration,

    /// Apply pending migrations before serving.
    pub migrate: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub orders: Arc<dyn OrdersService>,
    pub feedback: Arc<dyn FeedbackService>,
    pub contact: Arc<dyn ContactService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Wire every service against one pool, sharing a single notifier.
    #[must_use]
    pub fn new(db: Db, notifier: &Arc<dyn Notifier>, session_ttl: SignedDuration) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), Arc::clone(notifier))),
            feedback: Arc::new(PgFeedbackService::new(db.clone())),
            contact: Arc::new(RelayContactService::new(Arc::clone(notifier))),
            auth: Arc::new(PgAuthService::new(db, session_ttl)),
        }
    }

    /// Connect to the database and build the application context.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_config(
        config: &AppConfig,
        notifier: &Arc<dyn Notifier>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max(&config.database_url, config.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if config.migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::new(Db::new(pool), notifier, config.session_ttl))
    }
}
