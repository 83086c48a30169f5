//! Product request and response models.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kusuri_app::domain::products::records::{Category, ProductRecord};

use crate::extensions::*;

/// Product Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Unit price in paise
    pub price: u64,

    pub brand: String,
    pub category: String,
    pub images: Vec<String>,
    pub stock: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            id: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price,
            brand: product.brand,
            category: product.category.to_string(),
            images: product.images,
            stock: product.stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Single Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub success: bool,
    pub product: ProductResponse,
}

impl From<ProductRecord> for ProductEnvelope {
    fn from(product: ProductRecord) -> Self {
        Self {
            success: true,
            product: product.into(),
        }
    }
}

pub(crate) fn parse_category(value: &str) -> Result<Category, StatusError> {
    value.parse::<Category>().or_400("Unknown category")
}
