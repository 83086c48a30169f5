//! Test Helpers

use crate::{
    domain::{
        orders::data::NewOrderItem,
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{Category, ProductRecord, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_product(uuid: ProductUuid, name: &str, price: u64) -> NewProduct {
    NewProduct {
        uuid,
        name: name.to_string(),
        description: format!("{name} for everyday care"),
        price,
        brand: "Kusuri".to_string(),
        category: Category::Skincare,
        images: vec![format!("https://cdn.example.com/{uuid}.jpg")],
        stock: 10,
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(&ctx.admin, new_product(ProductUuid::new(), name, price))
        .await
}

pub(crate) fn line(product: &ProductRecord, quantity: u64) -> NewOrderItem {
    NewOrderItem {
        product: product.uuid,
        quantity,
    }
}
