//! Command implementations.
//!
//! Each command writes its report to a caller-supplied writer so the output
//! can be checked in tests; `main` passes stdout.

pub mod cart;
pub mod catalog;
pub mod rewards;

use std::path::Path;
use std::sync::Arc;

use credshop_storefront::catalog::CatalogError;
use credshop_storefront::config::ConfigError;
use credshop_storefront::storage::{FileStore, KeyValueStore, StorageError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog could not be fetched.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The data directory could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Open the durable store under `data_dir`.
fn durable_store(data_dir: &Path) -> Arc<dyn KeyValueStore> {
    tracing::debug!(data_dir = %data_dir.display(), "Opening data directory");
    Arc::new(FileStore::new(data_dir))
}
