//! App Router

use salvo::Router;

use crate::{
    auth, contact, feedback, healthcheck, observability::metrics_handler, orders, products,
};

/// Every API route. Catalog reads, registration, login and the contact form are public;
/// the rest sit behind the bearer-token middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(public_router())
        .push(Router::new().hoop(auth::middleware::handler).push(authenticated_router()))
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("contact").post(contact::create::handler))
}

fn authenticated_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("me").get(auth::me::handler))
                .push(Router::with_path("logout").post(auth::logout::handler)),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("my-orders").get(orders::mine::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::delete::handler)
                        .push(Router::with_path("status").patch(orders::status::handler)),
                ),
        )
        .push(
            Router::with_path("feedback")
                .get(feedback::index::handler)
                .post(feedback::create::handler)
                .push(Router::with_path("stats").get(feedback::stats::handler))
                .push(Router::with_path("{feedback}").delete(feedback::delete::handler)),
        )
        .push(
            Router::with_path("notifications/test").post(contact::test_notification::handler),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use kusuri_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::{orders::MockOrdersService, products::MockProductsService},
    };

    use crate::{
        orders::OrdersResponse,
        test_helpers::{Mocks, customer, service},
    };

    use super::*;

    fn signed_in_as_customer() -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .withf(|token| token == "ks_v1_valid")
            .returning(|_| Ok(customer()));

        auth
    }

    #[tokio::test]
    async fn catalog_is_public() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/products")
            .send(&service(
                Mocks {
                    products,
                    ..Mocks::default()
                },
                app_router(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn catalog_writes_need_a_token() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&serde_json::json!({}))
            .send(&service(Mocks::default(), app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn my_orders_is_not_taken_for_an_order_id() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_my_orders()
            .once()
            .return_once(|_| Ok(vec![]));

        let response: OrdersResponse = TestClient::get("http://example.com/orders/my-orders")
            .bearer_auth("ks_v1_valid")
            .send(&service(
                Mocks {
                    orders,
                    auth: signed_in_as_customer(),
                    ..Mocks::default()
                },
                app_router(),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn expired_session_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthenticated));

        let res = TestClient::get("http://example.com/orders/my-orders")
            .bearer_auth("ks_v1_expired")
            .send(&service(
                Mocks {
                    auth,
                    ..Mocks::default()
                },
                app_router(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
