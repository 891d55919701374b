//! Filesystem-backed league tables.
//!
//! Each table is a JSON Lines file under `<data_dir>/tables/`. The files are
//! the source of truth; everything else is derived on read.

mod jsonl;
mod snapshot;
mod table;

pub use jsonl::*;
pub use snapshot::*;
pub use table::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::RowId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {id} already exists in {table}")]
    DuplicateId { table: &'static str, id: RowId },

    #[error("Id {id} is out of range for {table}")]
    IdOutOfRange { table: &'static str, id: RowId },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.data_dir.join("tables")
    }

    pub fn table_path(&self, entity: EntityType) -> PathBuf {
        self.tables_dir().join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
