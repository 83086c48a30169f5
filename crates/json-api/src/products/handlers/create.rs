//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kusuri_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{ProductEnvelope, into_status_error, parse_category},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub description: String,

    /// Unit price in paise
    pub price: u64,

    pub brand: String,
    pub category: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub stock: u64,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, StatusError> {
        Ok(NewProduct {
            uuid: ProductUuid::new(),
            category: parse_category(&self.category)?,
            name: self.name,
            description: self.description,
            price: self.price,
            brand: self.brand,
            images: self.images,
            stock: self.stock,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not signed in"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty, price = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let requester = depot.requester_or_401()?;
    let product = json.into_inner().into_new_product()?;

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product.uuid));
    span.record("price", product.price);

    let product = state
        .app
        .products
        .create_product(requester, product)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use kusuri_app::domain::products::{
        MockProductsService, ProductsServiceError, records::Category,
    };

    use crate::{
        products::handlers::tests::make_product,
        test_helpers::{Mocks, admin, as_requester, customer, service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("products").post(handler)
    }

    fn body() -> serde_json::Value {
        json!({
            "name": "Neem Soap",
            "description": "Cold-processed, 100g",
            "price": 4_500,
            "brand": "Kusuri",
            "category": "Skincare",
            "images": ["/img/neem.jpg"],
            "stock": 25,
        })
    }

    #[tokio::test]
    async fn admin_creates_product() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|requester, product| {
                requester.is_admin()
                    && product.name == "Neem Soap"
                    && product.category == Category::Skincare
                    && product.stock == 25
            })
            .return_once(|_, product| Ok(make_product(product.uuid, &product.name, product.price)));

        let mut res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&as_requester(
                admin(),
                Mocks {
                    products,
                    ..Mocks::default()
                },
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let response: ProductEnvelope = res.take_json().await?;

        assert_eq!(
            location,
            Some(format!("/products/{}", response.product.id))
        );
        assert_eq!(response.product.price, 4_500);

        Ok(())
    }

    #[tokio::test]
    async fn customer_gets_403() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::Forbidden));

        let res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&as_requester(
                customer(),
                Mocks {
                    products,
                    ..Mocks::default()
                },
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_gets_401() -> TestResult {
        let res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&service(Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_returns_400() -> TestResult {
        let mut body = body();
        body["category"] = json!("Gadgets");

        let res = TestClient::post("http://example.com/products")
            .json(&body)
            .send(&as_requester(admin(), Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::BlankField("name")));

        let res = TestClient::post("http://example.com/products")
            .json(&body())
            .send(&as_requester(
                admin(),
                Mocks {
                    products,
                    ..Mocks::default()
                },
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
