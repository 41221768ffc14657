//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    categories::{
        errors::into_status_error,
        models::{CategoryRequest, CategoryResponse},
    },
    extensions::*,
    state::State,
};

/// Update Category Handler
///
/// Renames a category. Products keep the name they were saved with.
#[endpoint(
    tags("categories"),
    summary = "Rename Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category renamed"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category already exists"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.validated()?;

    let category = state
        .app
        .categories
        .update_category(id.into_inner().into(), &request.name)
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
