//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{NewCartItem, QuantityChange},
            errors::CartsServiceError,
            records::{CartItemUuid, CartRecord, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::repository::PgProductsRepository,
        users::records::UserUuid,
    },
};

/// Postgres-backed carts, one per user.
#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.find_cart(&mut tx, user).await? else {
            return Ok(CartRecord::empty(user));
        };

        let items = self.items_repository.list_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(CartRecord { user, items })
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        self.products_repository
            .get_product(&mut tx, item.product)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsServiceError::ProductNotFound,
                other => CartsServiceError::from(other),
            })?;

        let cart = self
            .carts_repository
            .ensure_cart(&mut tx, user, CartUuid::new())
            .await?;

        self.items_repository.add_item(&mut tx, cart, item).await?;

        let items = self.items_repository.list_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(CartRecord { user, items })
    }

    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        delta: i32,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let change = self
            .items_repository
            .apply_delta(&mut tx, cart, item, delta)
            .await?;

        if change == QuantityChange::Missing {
            return Err(CartsServiceError::NotFound);
        }

        let items = self.items_repository.list_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(CartRecord { user, items })
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self.items_repository.delete_item(&mut tx, cart, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let items = self.items_repository.list_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(CartRecord { user, items })
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        self.items_repository.clear_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(CartRecord::empty(user))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart with items resolved to current product details; empty
    /// when the user has never added anything.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product, creating the cart on first use and merging quantities
    /// for a product that is already present.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Apply a signed quantity delta; a result of zero or less removes the line.
    async fn update_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        delta: i32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a line, returning what is left.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Empty an existing cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, records::ProductUuid},
        test::{
            TestContext,
            helpers::{add_item, create_product, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_without_cart_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_creates_cart_with_single_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::new(2500, 2)).await?;

        add_item(&ctx, user.uuid, product.uuid, 3).await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.len(), 1);

        let line = cart.items.first().ok_or("missing line")?;

        assert_eq!(line.product.uuid, product.uuid);
        assert_eq!(line.product.name, "Lamp");
        assert_eq!(line.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 2).await?;
        let cart = add_item(&ctx, user.uuid, product.uuid, 5).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().map(|l| l.quantity), Some(7));

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;

        let result = add_item(&ctx, user.uuid, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_with_zero_quantity_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        let result = add_item(&ctx, user.uuid, product.uuid, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn merged_quantity_past_integer_range_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 2_000_000_000).await?;

        let result = add_item(&ctx, user.uuid, product.uuid, 2_000_000_000).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.first().map(|l| l.quantity), Some(2_000_000_000));

        Ok(())
    }

    #[tokio::test]
    async fn delta_past_integer_range_is_invalid_and_keeps_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        let cart = add_item(&ctx, user.uuid, product.uuid, 5).await?;
        let line = cart.items.first().ok_or("missing line")?.uuid;

        let result = ctx.carts.update_item(user.uuid, line, i32::MAX).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.first().map(|l| l.quantity), Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn positive_delta_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        let cart = add_item(&ctx, user.uuid, product.uuid, 1).await?;
        let line = cart.items.first().ok_or("missing line")?.uuid;

        let cart = ctx.carts.update_item(user.uuid, line, 1).await?;

        assert_eq!(cart.items.first().map(|l| l.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn negative_delta_to_zero_removes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        let cart = add_item(&ctx, user.uuid, product.uuid, 4).await?;
        let line = cart.items.first().ok_or("missing line")?.uuid;

        let cart = ctx.carts.update_item(user.uuid, line, -4).await?;

        assert!(cart.items.is_empty(), "line should be removed, not zeroed");

        Ok(())
    }

    #[tokio::test]
    async fn overshooting_negative_delta_removes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        let cart = add_item(&ctx, user.uuid, product.uuid, 1).await?;
        let line = cart.items.first().ok_or("missing line")?.uuid;

        let cart = ctx.carts.update_item(user.uuid, line, -10).await?;

        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_item_returns_not_found_and_keeps_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 2).await?;

        let result = ctx
            .carts
            .update_item(user.uuid, CartItemUuid::new(), -1)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.first().map(|l| l.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn update_without_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;

        let result = ctx.carts.update_item(user.uuid, CartItemUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn items_in_another_users_cart_are_not_reachable() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, "owner@example.com").await?;
        let other = create_user(&ctx, "other@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, other.uuid, product.uuid, 1).await?;
        let cart = add_item(&ctx, owner.uuid, product.uuid, 1).await?;
        let line = cart.items.first().ok_or("missing line")?.uuid;

        let result = ctx.carts.remove_item(other.uuid, line).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_returns_remaining_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let lamp = create_product(&ctx, "Lamp", Decimal::ONE).await?;
        let desk = create_product(&ctx, "Desk", Decimal::TEN).await?;

        add_item(&ctx, user.uuid, lamp.uuid, 1).await?;
        let cart = add_item(&ctx, user.uuid, desk.uuid, 1).await?;

        let lamp_line = cart
            .items
            .iter()
            .find(|l| l.product.uuid == lamp.uuid)
            .ok_or("missing lamp line")?
            .uuid;

        let cart = ctx.carts.remove_item(user.uuid, lamp_line).await?;

        let products: Vec<ProductUuid> = cart.items.iter().map(|l| l.product.uuid).collect();

        assert_eq!(products, vec![desk.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn remove_unknown_item_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 1).await?;

        let result = ctx.carts.remove_item(user.uuid, CartItemUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_then_get_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 2).await?;

        let cleared = ctx.carts.clear_cart(user.uuid).await?;

        assert!(cleared.items.is_empty());
        assert!(ctx.carts.get_cart(user.uuid).await?.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn clear_without_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;

        let result = ctx.carts.clear_cart(user.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cart_reflects_current_product_details() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 1).await?;

        ctx.products
            .update_product(
                product.uuid,
                crate::domain::products::data::ProductUpdate {
                    name: "Lamp v2".to_string(),
                    description: product.description.clone(),
                    price: Decimal::TEN,
                    stock: product.stock,
                    category: product.category.clone(),
                    images: None,
                },
            )
            .await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;
        let line = cart.items.first().ok_or("missing line")?;

        assert_eq!(line.product.name, "Lamp v2");
        assert_eq!(line.product.price, Decimal::TEN);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_product_drops_it_from_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "ada@example.com").await?;
        let product = create_product(&ctx, "Lamp", Decimal::ONE).await?;

        add_item(&ctx, user.uuid, product.uuid, 1).await?;
        ctx.products.delete_product(product.uuid).await?;

        assert!(ctx.carts.get_cart(user.uuid).await?.items.is_empty());

        Ok(())
    }
}
