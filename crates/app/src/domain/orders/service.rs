//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::records::UserUuid,
    },
    mail::{Mailer, is_plausible_email, templates},
    notifications::{OrderEvent, OrderNotifier},
};

/// Persists orders and publishes an event after each change.
#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    notifier: Arc<dyn OrderNotifier>,
    mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn OrderNotifier>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            notifier,
            mailer,
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if !order.is_valid() {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let uuid = self.repository.create_order(&mut tx, user, order).await?;
        let created = self.repository.get_order(&mut tx, uuid).await?;
        let orders = self.repository.list_orders(&mut tx, None).await?;

        tx.commit().await?;

        info!(order = %created.uuid, user = %user, total = %created.total_price, "order created");

        self.notifier.publish(OrderEvent::Created {
            order: created.clone(),
            orders,
        });

        Ok(created)
    }

    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, Some(user)).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, None).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.update_status(&mut tx, order, status).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let updated = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(order = %order, status = %status, "order status updated");

        self.notifier
            .publish(OrderEvent::StatusUpdated { order, status });

        Ok(updated)
    }

    async fn delete_order(
        &self,
        order: OrderUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let remaining = self.repository.list_orders(&mut tx, None).await?;

        tx.commit().await?;

        info!(order = %order, "order deleted");

        self.notifier.publish(OrderEvent::Deleted {
            orders: remaining.clone(),
            deleted: order,
        });

        Ok(remaining)
    }

    async fn send_confirmation(
        &self,
        user: UserUuid,
        recipient: &str,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let recipient = recipient.trim();

        if !is_plausible_email(recipient) {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if order.customer.uuid != user {
            return Err(OrdersServiceError::NotFound);
        }

        let email = templates::order_confirmation(recipient, &order)?;

        self.mailer.send(email).await?;

        info!(order = %order.uuid, "order confirmation sent");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Record an order as submitted, with status `Pending`. Clearing the cart
    /// is a separate step.
    async fn create_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_user_orders(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_all_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Overwrite an order's status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order, returning every order that remains.
    async fn delete_order(&self, order: OrderUuid)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Email a summary of one of the user's orders to `recipient`. Failure
    /// leaves the order untouched.
    async fn send_confirmation(
        &self,
        user: UserUuid,
        recipient: &str,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError>;
}
