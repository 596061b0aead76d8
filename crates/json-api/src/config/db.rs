//! Database Config

use clap::Args;

use checkout_app::database::DatabaseLocation;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string, defaults depend on whether we run in a container
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Apply pending migrations before serving requests
    #[arg(long, env = "DATABASE_MIGRATE", default_value_t = false)]
    pub migrate: bool,
}

impl DatabaseConfig {
    /// Where to connect, falling back to the environment defaults.
    #[must_use]
    pub fn location(&self) -> DatabaseLocation {
        DatabaseLocation::resolve(self.database_url.as_deref())
    }
}
