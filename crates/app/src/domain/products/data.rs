//! Products Data

use std::str::FromStr;

use crate::domain::{
    UnknownVariant,
    products::records::{Category, ProductUuid},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub brand: String,
    pub category: Category,
    pub images: Vec<String>,
    pub stock: u64,
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub brand: Option<String>,
    pub category: Option<Category>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u64>,
}

/// Catalog listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    /// Read a `sort` query value, falling back to newest-first for anything unrecognised.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub(crate) const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC, uuid DESC",
            Self::PriceAsc => "price ASC, created_at DESC",
            Self::PriceDesc => "price DESC, created_at DESC",
            Self::Name => "name ASC, created_at DESC",
        }
    }
}

impl FromStr for ProductSort {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(Self::Newest),
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            other => Err(UnknownVariant::new("sort", other)),
        }
    }
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// `None` lists every category.
    pub category: Option<Category>,

    /// Case-insensitive substring matched against name, brand and description.
    pub search: Option<String>,

    pub sort: ProductSort,
}
