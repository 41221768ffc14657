//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*, messages::MessageResponse, state::State, users::errors::into_status_error,
};

/// Delete User Handler
///
/// Removes an account together with its cart and orders.
#[endpoint(
    tags("users"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .users
        .delete_user(id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::users::{UsersServiceError, records::UserUuid};
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, admin_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        admin_service(mocks, Router::with_path("users/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_user_success() -> TestResult {
        let user = UserUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_delete_user()
            .once()
            .withf(move |uuid| *uuid == user)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/users/{user}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_user_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_delete_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/users/{}", UserUuid::new()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_malformed_id_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_delete_user().never();

        let res = TestClient::delete("http://example.com/users/not-a-uuid")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
