//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use kusuri_app::domain::products::records::{Category, ProductRecord, ProductUuid};

    pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: u64) -> ProductRecord {
        ProductRecord {
            uuid,
            name: name.to_string(),
            description: format!("{name}, 100g"),
            price,
            brand: "Kusuri".to_string(),
            category: Category::Skincare,
            images: vec!["/img/p.jpg".to_string()],
            stock: 5,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }
}
