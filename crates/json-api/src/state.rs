//! State

use std::sync::Arc;

use bazaar_app::context::AppContext;

use crate::{auth::SessionCookies, realtime::ConnectionRegistry};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) realtime: ConnectionRegistry,
    pub(crate) cookies: SessionCookies,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        app: AppContext,
        realtime: ConnectionRegistry,
        cookies: SessionCookies,
    ) -> Arc<Self> {
        Arc::new(Self {
            app,
            realtime,
            cookies,
        })
    }
}
