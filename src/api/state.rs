use std::sync::Arc;

use tokio::sync::Mutex;

use crate::names::MemberNameCache;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub names: Arc<MemberNameCache>,
    /// Serializes table writes; reads never take it.
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            names: Arc::new(MemberNameCache::new()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}
