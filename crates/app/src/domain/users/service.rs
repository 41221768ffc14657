//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{hash_password, is_acceptable_password},
    database::Db,
    domain::users::{
        data::{AdminSeed, NewUser},
        errors::UsersServiceError,
        records::{AuthType, Role, UserRecord, UserUuid, normalise_email},
        repository::PgUsersRepository,
    },
};

/// Postgres-backed user accounts.
#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let users = self.repository.list_users(&mut tx).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(user = %user, "user deleted");

        Ok(())
    }

    async fn update_role(
        &self,
        user: UserUuid,
        role: Role,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_role(&mut tx, user, role).await?;

        tx.commit().await?;

        info!(user = %user, role = %role, "user role changed");

        Ok(updated)
    }

    async fn ensure_admin(&self, seed: AdminSeed) -> Result<UserRecord, UsersServiceError> {
        let email = normalise_email(&seed.email);

        if email.is_empty() || !is_acceptable_password(&seed.password) {
            return Err(UsersServiceError::InvalidData);
        }

        let password_hash = hash_password(&seed.password)?;

        let mut tx = self.db.begin().await?;

        let admin = match self
            .repository
            .promote_user(&mut tx, &email, &password_hash)
            .await?
        {
            Some(promoted) => promoted,
            None => {
                self.repository
                    .create_user(
                        &mut tx,
                        NewUser {
                            uuid: UserUuid::new(),
                            name: seed.name.trim().to_string(),
                            email,
                            password_hash: Some(password_hash),
                            role: Role::Admin,
                            auth_type: AuthType::Local,
                            google_id: None,
                            avatar: None,
                        },
                    )
                    .await?
            }
        };

        tx.commit().await?;

        info!(user = %admin.uuid, email = %admin.email, "administrator ensured");

        Ok(admin)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// All accounts, newest first.
    async fn list_users(&self) -> Result<Vec<UserRecord>, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Delete an account together with its cart and orders.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;

    async fn update_role(&self, user: UserUuid, role: Role)
    -> Result<UserRecord, UsersServiceError>;

    /// Promote the account with the seed's email to administrator, creating
    /// it first when absent. An existing password is kept.
    async fn ensure_admin(&self, seed: AdminSeed) -> Result<UserRecord, UsersServiceError>;
}
