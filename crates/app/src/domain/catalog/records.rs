//! Catalog Records

use jiff::Timestamp;
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub brand_uuid: Option<Uuid>,
    pub category_uuid: Option<Uuid>,
    pub base_price: u64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Variant Record
///
/// `stock` is the live count; the order flow reads it under a row lock before trusting it.
#[derive(Debug, Clone)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub flavor: Option<String>,
    pub price: u64,
    pub stock: u32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product with its variants, in creation order.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: ProductRecord,
    pub variants: Vec<VariantRecord>,
}
