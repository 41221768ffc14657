//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, IdentityVerifier, PgAuthService, SessionKeys},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
        verification::{PgVerificationService, VerificationService},
    },
    mail::Mailer,
    notifications::OrderNotifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Outbound collaborators the services are built with.
#[derive(Clone)]
pub struct Collaborators {
    pub keys: SessionKeys,
    pub google: Arc<dyn IdentityVerifier>,
    pub mailer: Arc<dyn Mailer>,
    pub notifier: Arc<dyn OrderNotifier>,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub verification: Arc<dyn VerificationService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating
    /// fails.
    pub async fn from_database_url(
        url: &str,
        collaborators: Collaborators,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::new(Db::new(pool), collaborators))
    }

    #[must_use]
    pub fn new(db: Db, collaborators: Collaborators) -> Self {
        let Collaborators {
            keys,
            google,
            mailer,
            notifier,
        } = collaborators;

        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), keys, google)),
            users: Arc::new(PgUsersService::new(db.clone())),
            verification: Arc::new(PgVerificationService::new(db.clone(), mailer.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, notifier, mailer)),
        }
    }
}
