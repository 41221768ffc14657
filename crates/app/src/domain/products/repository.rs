//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{ProductImage, ProductRecord, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name.trim())
            .bind(product.description)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.category)
            .bind(Json(product.images))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.name.trim())
            .bind(update.description)
            .bind(update.price)
            .bind(update.stock)
            .bind(update.category)
            .bind(update.images.map(Json))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Read product columns named `{prefix}uuid`, `{prefix}name`, ... from a row.
pub(crate) fn try_get_product(row: &PgRow, prefix: &str) -> sqlx::Result<ProductRecord> {
    let column = |name: &str| format!("{prefix}{name}");

    Ok(ProductRecord {
        uuid: ProductUuid::from_uuid(row.try_get(column("uuid").as_str())?),
        name: row.try_get(column("name").as_str())?,
        description: row.try_get(column("description").as_str())?,
        price: row.try_get::<Decimal, _>(column("price").as_str())?,
        stock: row.try_get(column("stock").as_str())?,
        category: row.try_get(column("category").as_str())?,
        images: row
            .try_get::<Json<Vec<ProductImage>>, _>(column("images").as_str())?
            .0,
        created_at: row
            .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
            .to_jiff(),
    })
}

/// Like [`try_get_product`] for outer joins, where a missing product leaves
/// every prefixed column null.
pub(crate) fn try_get_optional_product(
    row: &PgRow,
    prefix: &str,
) -> sqlx::Result<Option<ProductRecord>> {
    let uuid: Option<Uuid> = row.try_get(format!("{prefix}uuid").as_str())?;

    uuid.map(|_| try_get_product(row, prefix)).transpose()
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        try_get_product(row, "")
    }
}
