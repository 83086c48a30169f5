//! My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, into_status_error},
    state::State,
};

/// My Orders Handler
///
/// Orders placed by the signed-in user, newest first.
#[endpoint(
    tags("orders"),
    summary = "My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The user's orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    let orders = state
        .app
        .orders
        .list_my_orders(requester)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
