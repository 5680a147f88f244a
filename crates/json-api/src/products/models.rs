//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::{ProductDetails, ProductRecord, VariantRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub brand_uuid: Option<Uuid>,
    pub category_uuid: Option<Uuid>,

    /// Display price in minor units; checkout always prices from the variant
    pub base_price: u64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            brand_uuid: product.brand_uuid,
            category_uuid: product.category_uuid,
            base_price: product.base_price,
            is_active: product.is_active,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub flavor: Option<String>,
    pub price: u64,
    pub stock: u32,
    pub is_active: bool,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        VariantResponse {
            uuid: variant.uuid.into(),
            product_uuid: variant.product_uuid.into(),
            sku: variant.sku,
            name: variant.name,
            size: variant.size,
            flavor: variant.flavor,
            price: variant.price,
            stock: variant.stock,
            is_active: variant.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub variants: Vec<VariantResponse>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        ProductDetailsResponse {
            product: details.product.into(),
            variants: details.variants.into_iter().map(Into::into).collect(),
        }
    }
}
