//! Test context for service-level integration tests.

use std::sync::Arc;

use jiff::SignedDuration;

use crate::{
    auth::{GoogleTokenVerifier, PgAuthService, SessionKeys},
    database::Db,
    domain::{
        carts::PgCartsService, categories::PgCategoriesService, orders::PgOrdersService,
        products::PgProductsService, users::PgUsersService,
        verification::PgVerificationService,
    },
    test::{RecordingMailer, RecordingNotifier, db::TestDb},
};

/// Every Postgres-backed service wired to one fresh database, with mail and
/// order events captured in memory.
pub(crate) struct TestContext {
    pub test_db: TestDb,
    pub db: Db,
    pub keys: SessionKeys,
    pub notifier: Arc<RecordingNotifier>,
    pub mailer: Arc<RecordingMailer>,
    pub auth: PgAuthService,
    pub users: PgUsersService,
    pub verification: PgVerificationService,
    pub categories: PgCategoriesService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let keys = SessionKeys::new(b"bazaar-test-session-secret", SignedDuration::from_hours(1));
        let notifier = Arc::new(RecordingNotifier::default());
        let mailer = Arc::new(RecordingMailer::default());

        Self {
            auth: PgAuthService::new(
                db.clone(),
                keys.clone(),
                Arc::new(GoogleTokenVerifier::new(None)),
            ),
            users: PgUsersService::new(db.clone()),
            verification: PgVerificationService::new(db.clone(), mailer.clone()),
            categories: PgCategoriesService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), notifier.clone(), mailer.clone()),
            test_db,
            db,
            keys,
            notifier,
            mailer,
        }
    }
}
