use checkout_app::database::DatabaseLocation;
use clap::{Args, Parser, Subcommand};

mod migrate;
mod user;

#[derive(Debug, Parser)]
#[command(name = "checkout-app", about = "Checkout admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
    User(user::UserCommand),
}

/// Database selection shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string; container or local default when omitted
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

impl DatabaseArgs {
    pub(crate) fn location(&self) -> DatabaseLocation {
        DatabaseLocation::resolve(self.database_url.as_deref())
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::User(command) => user::run(command).await,
        }
    }
}
