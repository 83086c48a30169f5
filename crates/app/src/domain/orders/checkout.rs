//! Checkout rules
//!
//! Everything here is pure: the service resolves the catalog and the stored order, then
//! asks these functions whether to proceed.

use rustc_hash::FxHashMap;

use crate::domain::{
    orders::{
        data::{NewOrder, NewOrderItem},
        errors::OrdersServiceError,
        records::{OrderItemUuid, OrderRecord},
    },
    products::records::{ProductRecord, ProductUuid},
    users::Requester,
};

/// Largest amount or quantity a `BIGINT` column holds.
pub const STORABLE_MAX: u64 = i64::MAX.unsigned_abs();

/// A cart line with the catalog name and price captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
    pub uuid: OrderItemUuid,
    pub product: ProductUuid,
    pub name: String,
    pub quantity: u64,
    pub price: u64,
}

/// Structural checks that need no store access.
pub fn validate_cart(order: &NewOrder) -> Result<(), OrdersServiceError> {
    if order.items.is_empty() {
        return Err(OrdersServiceError::EmptyCart);
    }

    if order.declared_total == 0 || order.declared_total > STORABLE_MAX {
        return Err(OrdersServiceError::InvalidTotal);
    }

    if order
        .items
        .iter()
        .any(|item| item.quantity == 0 || item.quantity > STORABLE_MAX)
    {
        return Err(OrdersServiceError::InvalidQuantity);
    }

    Ok(())
}

/// Snapshot each cart line against the resolved catalog, keeping cart order.
pub fn price_items(
    items: &[NewOrderItem],
    catalog: &FxHashMap<ProductUuid, ProductRecord>,
) -> Result<Vec<PricedItem>, OrdersServiceError> {
    items
        .iter()
        .map(|item| {
            let product = catalog
                .get(&item.product)
                .ok_or(OrdersServiceError::ProductNotFound(item.product))?;

            Ok(PricedItem {
                uuid: OrderItemUuid::new(),
                product: item.product,
                name: product.name.clone(),
                quantity: item.quantity,
                price: product.price,
            })
        })
        .collect()
}

/// `sum(price * quantity)`. A sum past [`STORABLE_MAX`] is an invalid total.
pub fn items_total(items: &[PricedItem]) -> Result<u64, OrdersServiceError> {
    items
        .iter()
        .try_fold(0_u64, |acc, item| {
            item.price
                .checked_mul(item.quantity)
                .and_then(|line| acc.checked_add(line))
        })
        .filter(|total| *total <= STORABLE_MAX)
        .ok_or(OrdersServiceError::InvalidTotal)
}

/// The declared total must equal the computed one exactly.
pub fn reconcile_total(declared: u64, computed: u64) -> Result<u64, OrdersServiceError> {
    if computed == 0 {
        return Err(OrdersServiceError::InvalidTotal);
    }

    if declared != computed {
        return Err(OrdersServiceError::TotalMismatch { declared, computed });
    }

    Ok(computed)
}

pub fn ensure_admin(requester: &Requester) -> Result<(), OrdersServiceError> {
    if requester.is_admin() {
        Ok(())
    } else {
        Err(OrdersServiceError::Forbidden)
    }
}

pub fn ensure_can_read(requester: &Requester, order: &OrderRecord) -> Result<(), OrdersServiceError> {
    if requester.can_access(order.user_uuid) {
        Ok(())
    } else {
        Err(OrdersServiceError::Forbidden)
    }
}
