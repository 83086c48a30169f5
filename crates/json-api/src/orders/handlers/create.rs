//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kusuri_app::domain::orders::{
    data::{NewOrder, NewOrderItem},
    records::OrderUuid,
};

use crate::{
    extensions::*,
    observability::metrics,
    orders::{OrderEnvelope, into_status_error},
    state::State,
};

/// Cart Line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    pub product: Uuid,
    pub quantity: u64,

    /// Price the client displayed; the catalog price is what gets charged.
    #[serde(default)]
    pub price: Option<u64>,
}

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub items: Vec<CartItemRequest>,

    /// Cart total in paise, checked against the catalog
    pub total_amount: u64,

    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        NewOrder {
            uuid: OrderUuid::new(),
            items: request
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product: item.product.into(),
                    quantity: item.quantity,
                })
                .collect(),
            declared_total: request.total_amount,
            notes: request.notes,
        }
    }
}

/// Checkout Handler
///
/// Places an order for the signed-in user from the submitted cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid cart or total"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        order_uuid = tracing::field::Empty,
        user_uuid = tracing::field::Empty,
        items_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;
    let order: NewOrder = json.into_inner().into();

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order.uuid));
    span.record("user_uuid", tracing::field::display(requester.uuid));
    span.record("items_count", order.items.len());

    let order = state
        .app
        .orders
        .create_order(requester, order)
        .await
        .map_err(into_status_error)?;

    metrics::record_order_created();

    tracing::info!(total_amount = order.total_amount, "order placed");

    res.status_code(StatusCode::CREATED);

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Json(order.into()))
}
