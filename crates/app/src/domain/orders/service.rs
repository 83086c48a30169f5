//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::{
        orders::{
            checkout,
            data::{NewOrder, OrderFilter},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repositories::{NewOrderRow, PgOrderItemsRepository, PgOrdersRepository},
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::Requester,
    },
    notifications::{self, NotificationKind, Notifier, messages},
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
    notifier: Arc<dyn Notifier>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            notifier,
        }
    }
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        requester: &Requester,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        checkout::validate_cart(&order)?;

        let mut tx = self.db.begin().await?;

        let product_uuids: Vec<ProductUuid> = order.items.iter().map(|item| item.product).collect();

        let catalog: FxHashMap<ProductUuid, ProductRecord> = self
            .products_repository
            .get_products_by_uuids(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let priced = checkout::price_items(&order.items, &catalog)?;
        let total_amount =
            checkout::reconcile_total(order.declared_total, checkout::items_total(&priced)?)?;

        let mut created = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrderRow {
                    uuid: order.uuid,
                    user_uuid: requester.uuid,
                    total_amount,
                    customer_name: requester.name.clone(),
                    customer_phone: requester.phone.clone(),
                    customer_email: requester.email.clone(),
                    notes: order.notes.unwrap_or_default(),
                },
            )
            .await?;

        created.items = self
            .items_repository
            .create_order_items(&mut tx, created.uuid, priced)
            .await?;

        tx.commit().await?;

        tracing::info!(
            order_uuid = %created.uuid,
            user_uuid = %created.user_uuid,
            total_amount = created.total_amount,
            items = created.items.len(),
            "order created"
        );

        notifications::dispatch(
            Arc::clone(&self.notifier),
            NotificationKind::Order,
            messages::order_placed(&created, Timestamp::now()),
        );

        Ok(created)
    }

    async fn get_order(
        &self,
        requester: &Requester,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;

        checkout::ensure_can_read(requester, &order)?;

        let mut orders = [order];

        self.items_repository
            .load_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        let [order] = orders;

        Ok(order)
    }

    async fn list_my_orders(
        &self,
        requester: &Requester,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_user_orders(&mut tx, requester.uuid)
            .await?;

        self.items_repository
            .load_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(
        &self,
        requester: &Requester,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        checkout::ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, filter.status.as_status(), filter.limit)
            .await?;

        self.items_repository
            .load_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        requester: &Requester,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        checkout::ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        let mut orders = [updated];

        self.items_repository
            .load_items(&mut tx, &mut orders)
            .await?;

        tx.commit().await?;

        let [updated] = orders;

        tracing::info!(order_uuid = %updated.uuid, status = %updated.status, "order status updated");

        Ok(updated)
    }

    async fn delete_order(
        &self,
        requester: &Requester,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        checkout::ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Check out a cart as `requester`, snapshotting catalog names and prices.
    ///
    /// The admin notification is sent after commit on a detached task; its outcome never
    /// affects the result.
    async fn create_order(
        &self,
        requester: &Requester,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order. Owner or admin only.
    async fn get_order(
        &self,
        requester: &Requester,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by `requester`, newest first.
    async fn list_my_orders(
        &self,
        requester: &Requester,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order matching `filter`, newest first. Admin only.
    async fn list_orders(
        &self,
        requester: &Requester,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Set the fulfillment status. Admin only; any status may follow any other.
    async fn update_status(
        &self,
        requester: &Requester,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Permanently delete an order and its items. Admin only.
    async fn delete_order(
        &self,
        requester: &Requester,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::data::{NewOrderItem, StatusFilter},
            products::{ProductsService, data::ProductUpdate},
        },
        notifications::{DeliveryReceipt, MockNotifier, NotifierError},
        test::{
            TestContext,
            helpers::{create_product, line},
        },
    };

    use super::*;

    fn new_order(items: Vec<NewOrderItem>, declared_total: u64) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            items,
            declared_total,
            notes: None,
        }
    }

    #[tokio::test]
    async fn checkout_snapshots_catalog_prices_and_contact_details() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;
        let balm = create_product(&ctx, "Lip Balm", 50).await?;

        let order = ctx
            .orders
            .create_order(
                &ctx.customer,
                NewOrder {
                    notes: Some("Leave at the gate".to_string()),
                    ..new_order(vec![line(&soap, 2), line(&balm, 1)], 250)
                },
            )
            .await?;

        assert_eq!(order.total_amount, 250);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_uuid, ctx.customer.uuid);
        assert_eq!(order.customer_name, ctx.customer.name);
        assert_eq!(order.customer_email, ctx.customer.email);
        assert_eq!(order.customer_phone, ctx.customer.phone);
        assert_eq!(order.notes, "Leave at the gate");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items_total(), Some(order.total_amount));

        let names: Vec<(&str, u64, u64)> = order
            .items
            .iter()
            .map(|item| (item.name.as_str(), item.quantity, item.price))
            .collect();

        assert_eq!(names, vec![("Neem Soap", 2, 100), ("Lip Balm", 1, 50)]);

        let fetched = ctx.orders.get_order(&ctx.customer, order.uuid).await?;

        assert_eq!(fetched, order);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_declared_total_mismatch() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let result = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 2)], 150))
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::TotalMismatch {
                    declared: 150,
                    computed: 200
                })
            ),
            "expected TotalMismatch, got {result:?}"
        );

        assert!(ctx.orders.list_my_orders(&ctx.customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_unknown_and_deleted_products() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;
        let retired = create_product(&ctx, "Old Tonic", 80).await?;

        ctx.products.delete_product(&ctx.admin, retired.uuid).await?;

        let missing = ProductUuid::new();

        let result = ctx
            .orders
            .create_order(
                &ctx.customer,
                new_order(
                    vec![
                        line(&soap, 1),
                        NewOrderItem {
                            product: missing,
                            quantity: 1,
                        },
                    ],
                    200,
                ),
            )
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductNotFound(uuid)) if uuid == missing),
            "expected ProductNotFound, got {result:?}"
        );

        let result = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&retired, 1)], 80))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::ProductNotFound(uuid)) if uuid == retired.uuid),
            "expected ProductNotFound for deleted product, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn checkout_rejects_empty_cart_and_zero_quantities() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let empty = ctx
            .orders
            .create_order(&ctx.customer, new_order(Vec::new(), 100))
            .await;

        assert!(
            matches!(empty, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {empty:?}"
        );

        let zero = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 0)], 0))
            .await;

        assert!(zero.is_err(), "expected zero quantity to be rejected");

        Ok(())
    }

    #[tokio::test]
    async fn order_keeps_its_price_after_catalog_changes() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 3)], 300))
            .await?;

        ctx.products
            .update_product(
                &ctx.admin,
                soap.uuid,
                ProductUpdate {
                    name: Some("Neem Soap XL".to_string()),
                    price: Some(180),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        let fetched = ctx.orders.get_order(&ctx.customer, order.uuid).await?;

        assert_eq!(fetched.total_amount, 300);
        assert_eq!(
            fetched
                .items
                .iter()
                .map(|item| (item.name.as_str(), item.price))
                .collect::<Vec<_>>(),
            vec![("Neem Soap", 100)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_visible_to_owner_and_admin_only() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        ctx.orders.get_order(&ctx.customer, order.uuid).await?;
        ctx.orders.get_order(&ctx.admin, order.uuid).await?;

        let result = ctx.orders.get_order(&ctx.other_customer, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        assert!(ctx.orders.list_my_orders(&ctx.other_customer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn missing_orders_are_not_found_for_everyone() -> TestResult {
        let ctx = TestContext::new().await;

        let missing = OrderUuid::new();

        for requester in [&ctx.customer, &ctx.other_customer, &ctx.admin] {
            let result = ctx.orders.get_order(requester, missing).await;

            assert!(
                matches!(result, Err(OrdersServiceError::NotFound)),
                "expected NotFound for {:?}, got {result:?}",
                requester.role
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn my_orders_are_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let first = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;
        let second = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 2)], 200))
            .await?;

        ctx.orders
            .create_order(&ctx.other_customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        let mine: Vec<OrderUuid> = ctx
            .orders
            .list_my_orders(&ctx.customer)
            .await?
            .into_iter()
            .map(|order| order.uuid)
            .collect();

        assert_eq!(mine, vec![second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn admin_listing_filters_by_status_and_limit() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let mut placed = Vec::new();

        for quantity in 1..=3 {
            placed.push(
                ctx.orders
                    .create_order(
                        &ctx.customer,
                        new_order(vec![line(&soap, quantity)], 100 * quantity),
                    )
                    .await?,
            );
        }

        let confirmed = placed.first().ok_or("no orders placed")?;

        ctx.orders
            .update_status(&ctx.admin, confirmed.uuid, OrderStatus::Confirmed)
            .await?;

        let all = ctx
            .orders
            .list_orders(&ctx.admin, OrderFilter::default())
            .await?;

        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|order| !order.items.is_empty()));

        let only_confirmed = ctx
            .orders
            .list_orders(
                &ctx.admin,
                OrderFilter {
                    status: StatusFilter::Only(OrderStatus::Confirmed),
                    limit: None,
                },
            )
            .await?;

        assert_eq!(
            only_confirmed.iter().map(|o| o.uuid).collect::<Vec<_>>(),
            vec![confirmed.uuid]
        );

        let limited = ctx
            .orders
            .list_orders(
                &ctx.admin,
                OrderFilter {
                    status: StatusFilter::All,
                    limit: Some(2),
                },
            )
            .await?;

        assert_eq!(limited.len(), 2);

        let uncapped = ctx
            .orders
            .list_orders(
                &ctx.admin,
                OrderFilter {
                    status: StatusFilter::All,
                    limit: Some(0),
                },
            )
            .await?;

        assert_eq!(uncapped.len(), 3);

        let result = ctx
            .orders
            .list_orders(&ctx.customer, OrderFilter::default())
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn admin_status_change_is_visible_to_owner() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        let updated = ctx
            .orders
            .update_status(&ctx.admin, order.uuid, OrderStatus::Ready)
            .await?;

        assert_eq!(updated.status, OrderStatus::Ready);
        assert_eq!(updated.items, order.items);
        assert!(updated.updated_at >= order.updated_at);

        let seen = ctx.orders.get_order(&ctx.customer, order.uuid).await?;

        assert_eq!(seen.status, OrderStatus::Ready);

        ctx.orders
            .update_status(&ctx.admin, order.uuid, OrderStatus::Cancelled)
            .await?;

        // Any status may follow any other, including leaving a terminal one.
        let reopened = ctx
            .orders
            .update_status(&ctx.admin, order.uuid, OrderStatus::Pending)
            .await?;

        assert_eq!(reopened.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn admin_may_move_between_any_two_statuses() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                ctx.orders
                    .update_status(&ctx.admin, order.uuid, from)
                    .await?;

                let denied = ctx
                    .orders
                    .update_status(&ctx.customer, order.uuid, to)
                    .await;

                assert!(
                    matches!(denied, Err(OrdersServiceError::Forbidden)),
                    "customer {from:?} -> {to:?}: expected Forbidden, got {denied:?}"
                );

                let moved = ctx
                    .orders
                    .update_status(&ctx.admin, order.uuid, to)
                    .await?;

                assert_eq!(moved.status, to, "admin {from:?} -> {to:?}");
            }
        }

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_change_status_or_delete() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        let update = ctx
            .orders
            .update_status(&ctx.customer, order.uuid, OrderStatus::Completed)
            .await;

        assert!(
            matches!(update, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {update:?}"
        );

        let delete = ctx.orders.delete_order(&ctx.customer, order.uuid).await;

        assert!(
            matches!(delete, Err(OrdersServiceError::Forbidden)),
            "expected Forbidden, got {delete:?}"
        );

        let unchanged = ctx.orders.get_order(&ctx.customer, order.uuid).await?;

        assert_eq!(unchanged.status, OrderStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_orders_are_gone_for_everyone() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        ctx.orders.delete_order(&ctx.admin, order.uuid).await?;

        let result = ctx.orders.get_order(&ctx.customer, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound after delete, got {result:?}"
        );

        assert!(ctx.orders.list_my_orders(&ctx.customer).await?.is_empty());

        let again = ctx.orders.delete_order(&ctx.admin, order.uuid).await;

        assert!(
            matches!(again, Err(OrdersServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        let status = ctx
            .orders
            .update_status(&ctx.admin, order.uuid, OrderStatus::Ready)
            .await;

        assert!(
            matches!(status, Err(OrdersServiceError::NotFound)),
            "expected NotFound for status update, got {status:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn placing_an_order_notifies_the_admin() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let order = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 2)], 200))
            .await?;

        let (kind, message) = ctx
            .next_notification()
            .await
            .ok_or("no notification sent")?;

        assert_eq!(kind, NotificationKind::Order);
        assert!(message.contains(&order.reference()));
        assert!(message.contains("Neem Soap x2"));
        assert!(message.contains(&ctx.customer.phone));

        Ok(())
    }

    #[tokio::test]
    async fn failed_checkout_sends_no_notification() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let result = ctx
            .orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 999))
            .await;

        assert!(result.is_err());
        assert!(ctx.next_notification().await.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_checkout() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let mut notifier = MockNotifier::new();

        notifier.expect_notify().returning(|_, _| {
            Err(NotifierError::Rejected {
                status: 401,
                body: "invalid token".to_string(),
            })
        });

        let orders = PgOrdersService::new(ctx.db(), Arc::new(notifier));

        let order = orders
            .create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100))
            .await?;

        assert_eq!(order.total_amount, 100);

        Ok(())
    }

    struct StalledNotifier;

    #[async_trait]
    impl Notifier for StalledNotifier {
        async fn notify(
            &self,
            _kind: NotificationKind,
            _message: &str,
        ) -> Result<DeliveryReceipt, NotifierError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;

            Ok(DeliveryReceipt::default())
        }
    }

    #[tokio::test]
    async fn slow_notifier_does_not_delay_checkout() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = create_product(&ctx, "Neem Soap", 100).await?;

        let orders = PgOrdersService::new(ctx.db(), Arc::new(StalledNotifier));

        let order = tokio::time::timeout(
            Duration::from_secs(10),
            orders.create_order(&ctx.customer, new_order(vec![line(&soap, 1)], 100)),
        )
        .await??;

        assert_eq!(order.status, OrderStatus::Pending);

        Ok(())
    }
}
