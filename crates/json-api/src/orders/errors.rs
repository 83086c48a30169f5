//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use kusuri_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        error @ (OrdersServiceError::EmptyCart
        | OrdersServiceError::InvalidTotal
        | OrdersServiceError::InvalidQuantity
        | OrdersServiceError::TotalMismatch { .. }) => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order"),
        error @ OrdersServiceError::ProductNotFound(_) => {
            StatusError::not_found().brief(error.to_string())
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => StatusError::forbidden().brief("Access denied"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
