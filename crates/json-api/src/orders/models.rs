//! Order response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kusuri_app::domain::orders::records::{OrderItemRecord, OrderRecord};

/// Order Line Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product: Uuid,

    /// Product name at checkout
    pub name: String,

    pub quantity: u64,

    /// Unit price in paise at checkout
    pub price: u64,

    pub images: Vec<String>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            product: item.product_uuid.into(),
            name: item.name,
            quantity: item.quantity,
            price: item.price,
            images: item.images,
        }
    }
}

/// Order Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    /// Short reference shown to customers and in notifications
    pub reference: String,

    pub user: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: u64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub notes: String,

    /// `pending`, `confirmed`, `ready`, `completed` or `cancelled`
    pub status: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into(),
            reference: order.reference(),
            user: order.user_uuid.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_amount: order.total_amount,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            customer_email: order.customer_email,
            notes: order.notes,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Single Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub success: bool,
    pub order: OrderResponse,
}

impl From<OrderRecord> for OrderEnvelope {
    fn from(order: OrderRecord) -> Self {
        Self {
            success: true,
            order: order.into(),
        }
    }
}

/// Order List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub success: bool,
    pub count: usize,
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<OrderRecord>> for OrdersResponse {
    fn from(orders: Vec<OrderRecord>) -> Self {
        Self {
            success: true,
            count: orders.len(),
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}
