//! Orders Data

use std::str::FromStr;

use crate::domain::{
    UnknownVariant,
    orders::records::{OrderStatus, OrderUuid},
    products::records::ProductUuid,
};

/// One cart line submitted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductUuid,
    pub quantity: u64,
}

/// New Order Data
///
/// The cart is held by the client until checkout, so it arrives here as a plain value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub items: Vec<NewOrderItem>,

    /// Client-declared total in minor units; checked against the catalog prices.
    pub declared_total: u64,

    pub notes: Option<String>,
}

/// Status selection for the admin order listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub(crate) fn as_status(self) -> Option<OrderStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }

        value.parse().map(Self::Only)
    }
}

/// Admin order listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: StatusFilter,

    /// Maximum number of orders to return; `None` or `Some(0)` returns all of them.
    pub limit: Option<u32>,
}
