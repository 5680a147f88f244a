//! Create Product Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::{data::NewProduct, records::ProductUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateProductRequest {
    /// Generated when omitted
    pub uuid: Option<Uuid>,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub description: String,
    pub brand_uuid: Option<Uuid>,
    pub category_uuid: Option<Uuid>,
    pub base_price: u64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, Into::into),
            name: request.name,
            slug: request.slug,
            description: request.description,
            brand_uuid: request.brand_uuid,
            category_uuid: request.category_uuid,
            base_price: request.base_price,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("admin"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "products.create", skip(json, depot, res), err)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .catalog
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.slug), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::catalog::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::{admin, catalog_service, make_product, with_admin_token};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        catalog_service(catalog, admin(Router::with_path("admin/products").post(handler)))
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .withf(move |new| {
                *new == NewProduct {
                    uuid,
                    name: "Whey Isolate".to_string(),
                    slug: "whey-isolate".to_string(),
                    description: String::new(),
                    brand_uuid: None,
                    category_uuid: None,
                    base_price: 89_900,
                }
            })
            .return_once(move |_| Ok(make_product(uuid, "whey-isolate")));

        let mut res = with_admin_token(TestClient::post("http://example.com/admin/products"))
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Whey Isolate",
                "slug": "whey-isolate",
                "basePrice": 89_900,
            }))
            .send(&make_service(catalog))
            .await;

        let body: ProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/products/whey-isolate"));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_duplicate_slug_returns_409() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::AlreadyExists));

        let res = with_admin_token(TestClient::post("http://example.com/admin/products"))
            .json(&json!({ "name": "Whey", "slug": "whey", "basePrice": 100 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_requires_admin_token() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_product().never();

        let res = TestClient::post("http://example.com/admin/products")
            .json(&json!({ "name": "Whey", "slug": "whey", "basePrice": 100 }))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
