//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kusuri_app::domain::products::data::{ProductFilter, ProductSort};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error, parse_category},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub success: bool,

    /// Number of products returned
    pub count: usize,

    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Lists live catalog products. `category=all` (or no category) lists every
/// category; unknown sort keys fall back to newest first.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    search: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = match category.into_inner().as_deref().map(str::trim) {
        None | Some("" | "all") => None,
        Some(name) => Some(parse_category(name)?),
    };

    let filter = ProductFilter {
        category,
        search: search
            .into_inner()
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty()),
        sort: ProductSort::from_query(sort.into_inner().as_deref()),
    };

    let products = state
        .app
        .products
        .list_products(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        success: true,
        count: products.len(),
        products: products.into_iter().map(Into::into).collect(),
    }))
}
