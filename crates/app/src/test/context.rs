//! Test context for service-level integration tests.

use crate::{
    auth::{
        AuthService, Credentials, PgAuthService, TokenAlgorithm, TokenSecret, TokenSettings,
        UserRecord,
    },
    database::Db,
    domain::{carts::PgCartsService, orders::PgOrdersService, products::PgProductsService},
};

use super::db::TestDb;

const TEST_SECRET: &str = "test-signing-secret";

pub struct TestContext {
    pub db: TestDb,
    pub auth: PgAuthService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            auth: PgAuthService::new(db.clone(), Self::token_settings()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db),
            db: test_db,
        }
    }

    /// Settings the context's auth service signs with.
    pub fn token_settings() -> TokenSettings {
        TokenSettings::new(
            TokenSecret::new(TEST_SECRET).expect("test secret is not empty"),
            TokenAlgorithm::Hs256,
            60,
        )
    }

    /// Register a user with a throwaway password.
    pub async fn create_user(&self, email: &str) -> UserRecord {
        self.auth
            .register(Credentials {
                email: email.to_string(),
                password: "password".to_string(),
            })
            .await
            .expect("Failed to create test user")
    }
}
