//! Verification Codes Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Transaction, query};
use uuid::Uuid;

use crate::domain::verification::records::VerificationPurpose;

const UPSERT_CODE_SQL: &str = include_str!("sql/upsert_code.sql");
const MARK_CODE_VERIFIED_SQL: &str = include_str!("sql/mark_code_verified.sql");
const TAKE_VERIFIED_CODE_SQL: &str = include_str!("sql/take_verified_code.sql");
const CONSUME_CODE_SQL: &str = include_str!("sql/consume_code.sql");

/// A code to store, replacing any earlier one for the same email and purpose.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingCode<'a> {
    pub email: &'a str,
    pub purpose: VerificationPurpose,
    pub name: Option<&'a str>,
    pub code_hash: &'a str,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVerificationCodesRepository;

impl PgVerificationCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn upsert_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: PendingCode<'_>,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CODE_SQL)
            .bind(Uuid::now_v7())
            .bind(code.email)
            .bind(code.purpose.as_str())
            .bind(code.name)
            .bind(code.code_hash)
            .bind(SqlxTimestamp::from(code.expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Mark a matching, unexpired code as verified.
    pub(crate) async fn mark_verified(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        purpose: VerificationPurpose,
        code_hash: &str,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(MARK_CODE_VERIFIED_SQL)
            .bind(email)
            .bind(purpose.as_str())
            .bind(code_hash)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Delete a verified, unexpired code, reporting whether there was one.
    pub(crate) async fn take_verified(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        purpose: VerificationPurpose,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(TAKE_VERIFIED_CODE_SQL)
            .bind(email)
            .bind(purpose.as_str())
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Delete a matching, unexpired code, reporting whether there was one.
    pub(crate) async fn consume_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        purpose: VerificationPurpose,
        code_hash: &str,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(CONSUME_CODE_SQL)
            .bind(email)
            .bind(purpose.as_str())
            .bind(code_hash)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}
