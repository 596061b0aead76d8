//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSettings},
    database::{self, DatabaseLocation, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// The services behind every entry point, sharing one connection pool.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database at `location` and build every service on top of it,
    /// applying pending migrations first when `migrate` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn new(
        location: &DatabaseLocation,
        tokens: TokenSettings,
        migrate: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(location)
            .await
            .map_err(AppInitError::Database)?;

        if migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(&Db::new(pool), tokens))
    }

    #[must_use]
    pub fn from_db(db: &Db, tokens: TokenSettings) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), tokens)),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
        }
    }
}
