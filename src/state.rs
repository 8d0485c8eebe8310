//! Application state management
//!
//! Shared state handed to every handler through Axum's `State` extractor.

use std::sync::Arc;

use crate::{config::Config, db::Store, guard::RouteTable, services::Mailer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    store: Arc<dyn Store>,
    config: Config,
    routes: RouteTable,
    mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        config: Config,
        routes: RouteTable,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                config,
                routes,
                mailer,
            }),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Route access table consulted by the guard middleware
    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.inner.mailer.as_ref()
    }
}
