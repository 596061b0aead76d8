//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use checkout_app::auth::UserRecord;

const CURRENT_USER_DEPOT_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_current_user(&mut self, user: UserRecord);

    fn current_user_or_401(&self) -> Result<&UserRecord, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: UserRecord) {
        self.insert(CURRENT_USER_DEPOT_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<&UserRecord, StatusError> {
        self.get::<UserRecord>(CURRENT_USER_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
