//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use kusuri_app::domain::users::Requester;

/// Typed access to values the middleware stack leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_requester(&mut self, requester: Requester);

    fn requester_or_401(&self) -> Result<&Requester, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_requester(&mut self, requester: Requester) {
        self.inject(requester);
    }

    fn requester_or_401(&self) -> Result<&Requester, StatusError> {
        self.obtain::<Requester>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
