//! Create Category Handler

use std::sync::Arc;

use bazaar_app::domain::categories::records::CategoryUuid;
use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    categories::{
        errors::into_status_error,
        models::{CategoryRequest, CategoryResponse},
    },
    extensions::*,
    state::State,
};

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Category name is required"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    let category = state
        .app
        .categories
        .create_category(CategoryUuid::new(), &request.name)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::categories::CategoriesServiceError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        categories::handlers::tests::make_category,
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("category/create").post(handler))
    }

    #[tokio::test]
    async fn test_create_category_returns_201() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_create_category()
            .once()
            .withf(|_, name| name == "Home Office")
            .return_once(|uuid, _| Ok(make_category(uuid, "home office")));

        let mut res = TestClient::post("http://example.com/category/create")
            .json(&json!({ "name": "Home Office" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: CategoryResponse = res.take_json().await?;

        assert_eq!(body.name, "home office");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_category_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_create_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/category/create")
            .json(&json!({ "name": "home" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_name_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_create_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::InvalidData));

        let res = TestClient::post("http://example.com/category/create")
            .json(&json!({ "name": "   " }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
