//! Catalog Data

use uuid::Uuid;

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub brand_uuid: Option<Uuid>,
    pub category_uuid: Option<Uuid>,
    pub base_price: u64,
}

/// New Variant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub flavor: Option<String>,
    pub price: u64,
    pub stock: u32,
}
