//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::users::{
    data::NewUser,
    records::{AuthType, Role, UserCredentials, UserRecord, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_EMAIL_SQL: &str = include_str!("sql/find_user_by_email.sql");
const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");
const UPDATE_USER_ROLE_SQL: &str = include_str!("sql/update_user_role.sql");
const UPDATE_USER_PASSWORD_SQL: &str = include_str!("sql/update_user_password.sql");
const LINK_GOOGLE_ACCOUNT_SQL: &str = include_str!("sql/link_google_account.sql");
const PROMOTE_USER_SQL: &str = include_str!("sql/promote_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .bind(user.auth_type.as_str())
            .bind(user.google_id)
            .bind(user.avatar)
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn find_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        let rows = query_as::<Postgres, UserCredentials>(LIST_USERS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(rows.into_iter().map(|credentials| credentials.user).collect())
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: Role,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(UPDATE_USER_ROLE_SQL)
            .bind(user.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn update_password(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_USER_PASSWORD_SQL)
            .bind(email)
            .bind(password_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Attach a Google identity to an existing account without overwriting
    /// a previously linked one.
    pub(crate) async fn link_google_account(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        google_id: &str,
        avatar: Option<&str>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(LINK_GOOGLE_ACCOUNT_SQL)
            .bind(user.into_uuid())
            .bind(google_id)
            .bind(avatar)
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn promote_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        let promoted = query_as::<Postgres, UserCredentials>(PROMOTE_USER_SQL)
            .bind(email)
            .bind(password_hash)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(promoted.map(|credentials| credentials.user))
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;
        let auth_type: String = row.try_get("auth_type")?;

        let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        let auth_type = auth_type
            .parse::<AuthType>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "auth_type".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            user: UserRecord {
                uuid: UserUuid::from_uuid(row.try_get("uuid")?),
                name: row.try_get("name")?,
                email: row.try_get("email")?,
                role,
                auth_type,
                google_id: row.try_get("google_id")?,
                avatar: row.try_get("avatar")?,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}
