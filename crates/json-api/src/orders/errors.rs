//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use checkout_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Sql(source) => {
            error!("failed to fetch orders: {source}");

            StatusError::internal_server_error()
        }
    }
}
