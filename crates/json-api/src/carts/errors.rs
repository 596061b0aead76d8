//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use checkout_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Product or cart item not found")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        CartsServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        CartsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Cart total out of range")
        }
        CartsServiceError::TransactionFailed(source) => {
            error!("cart transaction failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
