//! Category Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    categories::{errors::into_status_error, models::CategoryResponse},
    extensions::*,
    state::State,
};

/// Category Index Handler
///
/// All categories in name order.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(into_status_error)?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::categories::{CategoriesServiceError, records::CategoryUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        categories::handlers::tests::make_category,
        test_helpers::{Mocks, public_service, storage_error},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("category").get(handler))
    }

    #[tokio::test]
    async fn test_index_is_public() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.categories.expect_list_categories().once().return_once(|| {
            Ok(vec![
                make_category(CategoryUuid::new(), "garden"),
                make_category(CategoryUuid::new(), "home"),
            ])
        });

        let body: Vec<CategoryResponse> = TestClient::get("http://example.com/category")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let names: Vec<&str> = body.iter().map(|category| category.name.as_str()).collect();

        assert_eq!(names, ["garden", "home"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::Sql(storage_error())));

        let res = TestClient::get("http://example.com/category")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
