use checkout_app::{
    auth::{AuthService, Credentials, PgAuthService, TokenAlgorithm, TokenSecret, TokenSettings},
    database::{self, Db},
};
use clap::Args;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Login email
    #[arg(long)]
    email: String,

    /// Plaintext password; only its hash is stored
    #[arg(long, env = "CHECKOUT_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database.location())
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // Registration never signs tokens, so a throwaway key is enough here.
    let secret = TokenSecret::new(rand::random::<[u8; 32]>())
        .map_err(|error| format!("failed to build signing key: {error}"))?;

    let service = PgAuthService::new(
        Db::new(pool),
        TokenSettings::new(secret, TokenAlgorithm::default(), 1),
    );

    let user = service
        .register(Credentials {
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);

    Ok(())
}
