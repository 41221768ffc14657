//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid, normalise_category_name},
        repository::PgCategoriesRepository,
    },
};

/// Postgres-backed product categories.
#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn create_category(
        &self,
        uuid: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let name = normalise_category_name(name).ok_or(CategoriesServiceError::InvalidData)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_category(&mut tx, uuid, &name)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        uuid: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let name = normalise_category_name(name).ok_or(CategoriesServiceError::InvalidData)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, uuid, &name)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, uuid: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// All categories in name order.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    async fn create_category(
        &self,
        uuid: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    async fn update_category(
        &self,
        uuid: CategoryUuid,
        name: &str,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Products naming the category are left untouched.
    async fn delete_category(&self, uuid: CategoryUuid) -> Result<(), CategoriesServiceError>;
}
