//! Product Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::UnknownVariant, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Skincare,
    Makeup,
    Haircare,
    Fragrance,
    Food,
    Artifacts,
    Clothing,
    Other,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Skincare,
        Self::Makeup,
        Self::Haircare,
        Self::Fragrance,
        Self::Food,
        Self::Artifacts,
        Self::Clothing,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skincare => "Skincare",
            Self::Makeup => "Makeup",
            Self::Haircare => "Haircare",
            Self::Fragrance => "Fragrance",
            Self::Food => "Food",
            Self::Artifacts => "Artifacts",
            Self::Clothing => "Clothing",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant::new("category", value))
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub brand: String,
    pub category: Category,
    pub images: Vec<String>,
    pub stock: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
