//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// A caller who never added anything gets an empty cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.identity_or_401()?.user;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::carts::records::CartRecord;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        carts::models::tests::make_cart,
        test_helpers::{CUSTOMER_UUID, Mocks, customer_service, public_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_get_cart() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .withf(|user| *user == CUSTOMER_UUID)
            .return_once(|_| Ok(make_cart(&[1, 3])));

        let body: CartResponse = TestClient::get("http://example.com/cart/get-cart")
            .send(&customer_service(
                mocks,
                Router::with_path("cart/get-cart").get(handler),
            ))
            .await
            .take_json()
            .await?;

        let quantities: Vec<i32> = body.cart_items.iter().map(|item| item.quantity).collect();

        assert_eq!(quantities, [1, 3]);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|user| Ok(CartRecord::empty(user)));

        let body: CartResponse = TestClient::get("http://example.com/cart/get-cart")
            .send(&customer_service(
                mocks,
                Router::with_path("cart/get-cart").get(handler),
            ))
            .await
            .take_json()
            .await?;

        assert!(body.cart_items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_caller_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/cart/get-cart")
            .send(&public_service(
                mocks,
                Router::with_path("cart/get-cart").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
