//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::catalog::{Catalog, CatalogSource};
use crate::shop::Shop;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every handler goes through
/// the single [`Shop`] behind a mutex, so mutations are applied one at a
/// time in arrival order.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    shop: Mutex<Shop>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(shop: Shop) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Lock the shop.
    pub async fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner.shop.lock().await
    }

    /// Fetch the catalog from `source` and install it.
    ///
    /// The fetch runs without holding the lock; the result is swapped in
    /// with a single assignment.
    pub async fn load_catalog<S: CatalogSource>(&self, source: &S) {
        let catalog = Catalog::load(source).await;
        self.shop().await.replace_catalog(catalog);
    }

    /// Start the catalog load in the background.
    ///
    /// Returns immediately; the shop reports `Loading` until the fetch
    /// settles.
    pub fn start_catalog_load<S>(&self, source: S) -> tokio::task::JoinHandle<()>
    where
        S: CatalogSource + 'static,
    {
        let state = self.clone();
        tokio::spawn(async move {
            state.load_catalog(&source).await;
        })
    }
}
