//! Carts Repository

use sqlx::{Postgres, Transaction, query_scalar};
use uuid::Uuid;

use crate::domain::{carts::records::CartUuid, users::records::UserUuid};

const FIND_CART_SQL: &str = include_str!("../sql/find_cart.sql");
const ENSURE_CART_SQL: &str = include_str!("../sql/ensure_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartUuid>, sqlx::Error> {
        let cart: Option<Uuid> = query_scalar(FIND_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(cart.map(CartUuid::from_uuid))
    }

    /// Return the user's cart, creating it with `candidate` as its id when
    /// none exists yet.
    pub(crate) async fn ensure_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        candidate: CartUuid,
    ) -> Result<CartUuid, sqlx::Error> {
        let cart: Uuid = query_scalar(ENSURE_CART_SQL)
            .bind(candidate.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartUuid::from_uuid(cart))
    }
}
