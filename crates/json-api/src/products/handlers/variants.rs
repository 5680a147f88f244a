//! Create Variant Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::{
    CatalogServiceError, data::NewVariant, records::VariantUuid,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::VariantResponse},
};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateVariantRequest {
    /// Generated when omitted
    pub uuid: Option<Uuid>,
    pub sku: String,
    pub name: String,
    pub size: Option<String>,
    pub flavor: Option<String>,
    pub price: u64,

    #[serde(default)]
    pub stock: u32,
}

impl From<CreateVariantRequest> for NewVariant {
    fn from(request: CreateVariantRequest) -> Self {
        NewVariant {
            uuid: request.uuid.map_or_else(VariantUuid::new, Into::into),
            sku: request.sku,
            name: request.name,
            size: request.size,
            flavor: request.flavor,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Create Variant Handler
#[endpoint(
    tags("admin"),
    summary = "Create Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "SKU already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let variant = state
        .catalog
        .create_variant(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(|error| match error {
            CatalogServiceError::InvalidReference => {
                StatusError::not_found().brief("Product not found")
            }
            other => into_status_error(other),
        })?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(variant.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::catalog::{MockCatalogService, records::ProductUuid};

    use crate::test_helpers::{admin, catalog_service, make_variant, with_admin_token};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(
            catalog,
            admin(Router::with_path("admin/products/{product}/variants").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_create_variant_success() -> TestResult {
        let product_uuid = ProductUuid::new();
        let variant_uuid = VariantUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_variant()
            .once()
            .withf(move |product, new| {
                *product == product_uuid
                    && new.uuid == variant_uuid
                    && new.sku == "WHEY-VAN-2KG"
                    && new.stock == 12
            })
            .return_once(move |_, _| Ok(make_variant(variant_uuid, product_uuid, 12)));

        let mut res = with_admin_token(TestClient::post(format!(
            "http://example.com/admin/products/{product_uuid}/variants"
        )))
        .json(&json!({
            "uuid": variant_uuid.into_uuid(),
            "sku": "WHEY-VAN-2KG",
            "name": "Vanilla 2kg",
            "price": 89_900,
            "stock": 12,
        }))
        .send(&make_service(catalog))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: VariantResponse = res.take_json().await?;

        assert_eq!(body.uuid, variant_uuid.into_uuid());
        assert_eq!(body.product_uuid, product_uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_variant_for_unknown_product_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_variant()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::InvalidReference));

        let res = with_admin_token(TestClient::post(format!(
            "http://example.com/admin/products/{}/variants",
            Uuid::now_v7()
        )))
        .json(&json!({ "sku": "X", "name": "X", "price": 100 }))
        .send(&make_service(catalog))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
