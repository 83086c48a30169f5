//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::Requester,
        validation::non_blank,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let filter = ProductFilter {
            search: filter.search.as_deref().and_then(non_blank),
            ..filter
        };

        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        requester: &Requester,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        ensure_admin(requester)?;

        let product = NewProduct {
            name: required("name", &product.name)?,
            description: required("description", &product.description)?,
            brand: required("brand", &product.brand)?,
            ..product
        };

        i64::try_from(product.price)?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        requester: &Requester,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        ensure_admin(requester)?;

        let update = ProductUpdate {
            name: update.name.as_deref().map(|v| required("name", v)).transpose()?,
            description: update
                .description
                .as_deref()
                .map(|v| required("description", v))
                .transpose()?,
            brand: update
                .brand
                .as_deref()
                .map(|v| required("brand", v))
                .transpose()?,
            ..update
        };

        if let Some(price) = update.price {
            i64::try_from(price)?;
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        requester: &Requester,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        ensure_admin(requester)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

fn ensure_admin(requester: &Requester) -> Result<(), ProductsServiceError> {
    if requester.is_admin() {
        Ok(())
    } else {
        Err(ProductsServiceError::Forbidden)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ProductsServiceError> {
    non_blank(value).ok_or(ProductsServiceError::BlankField(field))
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves live products matching the filter.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Adds a product to the catalog. Admin only.
    async fn create_product(
        &self,
        requester: &Requester,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Changes the fields present in `update`. Admin only.
    async fn update_product(
        &self,
        requester: &Requester,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Removes a product from the catalog. Admin only.
    async fn delete_product(
        &self,
        requester: &Requester,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{data::ProductSort, records::Category},
        test::{TestContext, helpers::new_product},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(&ctx.admin, new_product(uuid, "Rose Water", 349))
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Rose Water");
        assert_eq!(product.price, 349);
        assert_eq!(product.category, Category::Skincare);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_trims_text_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(
                &ctx.admin,
                NewProduct {
                    name: "  Kumkumadi Oil ".to_string(),
                    ..new_product(ProductUuid::new(), "ignored", 100)
                },
            )
            .await?;

        assert_eq!(product.name, "Kumkumadi Oil");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_blank_brand() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(
                &ctx.admin,
                NewProduct {
                    brand: "   ".to_string(),
                    ..new_product(ProductUuid::new(), "Rose Water", 100)
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::BlankField("brand"))),
            "expected BlankField(brand), got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_as_customer_is_forbidden() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(&ctx.customer, new_product(ProductUuid::new(), "Soap", 50))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.admin, new_product(uuid, "Soap", 50))
            .await?;

        let result = ctx
            .products
            .create_product(&ctx.admin, new_product(uuid, "Soap", 60))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        let soap = ctx
            .products
            .create_product(&ctx.admin, new_product(ProductUuid::new(), "Soap", 50))
            .await?;

        let saree = ctx
            .products
            .create_product(
                &ctx.admin,
                NewProduct {
                    category: Category::Clothing,
                    ..new_product(ProductUuid::new(), "Saree", 2_500)
                },
            )
            .await?;

        let products = ctx
            .products
            .list_products(ProductFilter {
                category: Some(Category::Clothing),
                ..ProductFilter::default()
            })
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![saree.uuid]);
        assert!(!uuids.contains(&soap.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_search_matches_brand_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        let matching = ctx
            .products
            .create_product(
                &ctx.admin,
                NewProduct {
                    brand: "Forest Essentials".to_string(),
                    ..new_product(ProductUuid::new(), "Face Wash", 675)
                },
            )
            .await?;

        ctx.products
            .create_product(&ctx.admin, new_product(ProductUuid::new(), "Soap", 50))
            .await?;

        let products = ctx
            .products
            .list_products(ProductFilter {
                search: Some("forest".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![matching.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_sorts_by_price() -> TestResult {
        let ctx = TestContext::new().await;

        for (name, price) in [("Mid", 200), ("Cheap", 100), ("Dear", 300)] {
            ctx.products
                .create_product(&ctx.admin, new_product(ProductUuid::new(), name, price))
                .await?;
        }

        let ascending = ctx
            .products
            .list_products(ProductFilter {
                sort: ProductSort::PriceAsc,
                ..ProductFilter::default()
            })
            .await?;

        let descending = ctx
            .products
            .list_products(ProductFilter {
                sort: ProductSort::PriceDesc,
                ..ProductFilter::default()
            })
            .await?;

        let asc: Vec<u64> = ascending.iter().map(|p| p.price).collect();
        let desc: Vec<u64> = descending.iter().map(|p| p.price).collect();

        assert_eq!(asc, vec![100, 200, 300]);
        assert_eq!(desc, vec![300, 200, 100]);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_changes_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.admin, new_product(uuid, "Soap", 50))
            .await?;

        let updated = ctx
            .products
            .update_product(
                &ctx.admin,
                uuid,
                ProductUpdate {
                    price: Some(75),
                    stock: Some(3),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Soap");
        assert_eq!(updated.price, 75);
        assert_eq!(updated.stock, 3);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                &ctx.admin,
                ProductUuid::new(),
                ProductUpdate {
                    price: Some(10),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_hides_it_from_reads() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.admin, new_product(uuid, "Soap", 50))
            .await?;

        ctx.products.delete_product(&ctx.admin, uuid).await?;

        let result = ctx.products.get_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let products = ctx.products.list_products(ProductFilter::default()).await?;

        assert!(!products.iter().any(|p| p.uuid == uuid));

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(&ctx.admin, new_product(uuid, "Soap", 50))
            .await?;

        ctx.products.delete_product(&ctx.admin, uuid).await?;

        let result = ctx.products.delete_product(&ctx.admin, uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
