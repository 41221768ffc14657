//! Orders Repository

use std::collections::HashMap;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::{
    orders::{
        data::NewOrder,
        records::{
            OrderCustomer, OrderItemRecord, OrderRecord, OrderStatus, OrderUuid, ShippingAddress,
        },
    },
    products::{records::ProductUuid, repository::try_get_optional_product},
    users::records::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order and its lines, keeping the submitted line order.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderUuid, sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(order.total_price)
            .bind(order.shipping_address.map(Json))
            .execute(&mut **tx)
            .await?;

        for (position, item) in (0_i32..).zip(order.items) {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(Uuid::now_v7())
                .bind(order.uuid.into_uuid())
                .bind(item.product.into_uuid())
                .bind(item.quantity)
                .bind(position)
                .execute(&mut **tx)
                .await?;
        }

        Ok(order.uuid)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = self.attach_items(tx, vec![order]).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Orders newest first, limited to one customer when `user` is given.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Option<UserUuid>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let orders = query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.map(UserUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await?;

        self.attach_items(tx, orders).await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<OrderRecord>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(orders);
        }

        let ids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await?;

        let mut items: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for row in rows {
            items.entry(row.order).or_default().push(row.item);
        }

        for order in &mut orders {
            order.items = items.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

struct OrderItemRow {
    order: OrderUuid,
    item: OrderItemRecord,
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: OrderItemRecord {
                product_uuid: ProductUuid::from_uuid(row.try_get("item_product_uuid")?),
                quantity: row.try_get("quantity")?,
                product: try_get_optional_product(row, "product_")?,
            },
        })
    }
}

/// Reads the order header; lines are attached separately.
impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let shipping_address: Option<Json<ShippingAddress>> = row.try_get("shipping_address")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer: OrderCustomer {
                uuid: UserUuid::from_uuid(row.try_get("customer_uuid")?),
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
            },
            items: Vec::new(),
            total_price: row.try_get("total_price")?,
            shipping_address: shipping_address.map(|address| address.0),
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
