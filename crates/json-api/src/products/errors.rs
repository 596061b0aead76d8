//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use checkout_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::OutOfRange(_) => {
            StatusError::bad_request().brief("Price or stock out of range")
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to access products: {source}");

            StatusError::internal_server_error()
        }
    }
}
