//! Order Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use kusuri_app::domain::orders::{
    checkout::ensure_admin,
    data::{OrderFilter, StatusFilter},
};

use crate::{
    extensions::*,
    orders::{OrdersResponse, into_status_error},
    state::State,
};

/// Order Index Handler
///
/// Every order, newest first. `status` is `all` or one order status; a `limit` of 0 or
/// none at all lists every match.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Matching orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;

    ensure_admin(requester).map_err(into_status_error)?;

    let status = match status.into_inner() {
        Some(status) => status.parse::<StatusFilter>().or_400("Unknown order status")?,
        None => StatusFilter::All,
    };

    let orders = state
        .app
        .orders
        .list_orders(
            requester,
            OrderFilter {
                status,
                limit: limit.into_inner().filter(|limit| *limit > 0),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
