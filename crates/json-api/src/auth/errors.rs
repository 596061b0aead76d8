//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use checkout_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        AuthServiceError::Unauthorized => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Email and password are required")
        }
        AuthServiceError::Sql(source) => {
            error!("failed to access users: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Task(source) => {
            error!("password task failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
