//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductRequest, ProductResponse},
    },
    state::State,
};

/// Update Product Handler
///
/// Replaces the product's details. Images are replaced only when supplied.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product payload"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    let product = state
        .app
        .products
        .update_product(id.into_inner().into(), request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::products::{ProductsServiceError, records::ProductUuid};
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin_service, make_product};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("product/update/{id}").put(handler))
    }

    #[tokio::test]
    async fn test_update_without_images_keeps_them() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .withf(move |target, update| {
                *target == uuid && update.images.is_none() && update.stock == 3
            })
            .return_once(|uuid, update| Ok(make_product(uuid, update.price)));

        let body: ProductResponse =
            TestClient::put(format!("http://example.com/product/update/{uuid}"))
                .json(&json!({
                    "name": "Desk Lamp",
                    "price": 24.5,
                    "stock": 3,
                    "category": "home",
                }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(body.price, Decimal::new(245, 1));
        assert_eq!(body.images.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/product/update/{}",
            ProductUuid::new()
        ))
        .json(&json!({ "name": "Lamp", "price": 1, "stock": 1, "category": "home" }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
