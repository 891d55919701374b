//! Member display-name lookup.
//!
//! Names are resolved from an immutable snapshot of the member table. The
//! shared cache swaps whole snapshots in and out, so readers never observe a
//! half-built map.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::models::{LeagueMember, MemberId};
use crate::storage::{StorageConfig, Table};

/// Placeholder for members whose name cannot be resolved.
pub const UNKNOWN_MEMBER: &str = "Unknown";

/// Immutable memberId → name snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemberNames(Arc<HashMap<MemberId, String>>);

impl MemberNames {
    /// Members without a name are left out and resolve to the placeholder.
    pub fn from_members(members: &[LeagueMember]) -> Self {
        let map = members
            .iter()
            .filter_map(|m| m.name.as_ref().map(|name| (m.id, name.clone())))
            .collect();
        Self(Arc::new(map))
    }

    /// Read the member table. A failed read yields an empty snapshot.
    pub fn load(storage: &StorageConfig) -> Self {
        match Table::<LeagueMember>::open(storage).list() {
            Ok(members) => Self::from_members(&members),
            Err(e) => {
                warn!("Failed to load league member names: {}", e);
                Self::default()
            }
        }
    }

    pub fn resolve(&self, member_id: MemberId) -> &str {
        self.0
            .get(&member_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_MEMBER)
    }

    pub fn contains(&self, member_id: MemberId) -> bool {
        self.0.contains_key(&member_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shared name cache for the API.
///
/// Single writer, many readers. Any write to the member table must call
/// [`MemberNameCache::invalidate`].
#[derive(Debug, Default)]
pub struct MemberNameCache {
    snapshot: RwLock<Option<MemberNames>>,
}

impl MemberNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, loading it from storage on a miss.
    ///
    /// The table is read on the blocking pool with no lock held. A failed load
    /// is not cached so the next call retries.
    pub async fn snapshot(&self, storage: &StorageConfig) -> MemberNames {
        if let Some(names) = self.snapshot.read().await.as_ref() {
            return names.clone();
        }

        let storage = storage.clone();
        let loaded =
            tokio::task::spawn_blocking(move || Table::<LeagueMember>::open(&storage).list())
                .await;
        let members = match loaded {
            Ok(Ok(members)) => members,
            Ok(Err(e)) => {
                warn!("Failed to load league member names: {}", e);
                return MemberNames::default();
            }
            Err(e) => {
                warn!("Member name load task failed: {}", e);
                return MemberNames::default();
            }
        };

        let mut guard = self.snapshot.write().await;
        if let Some(names) = guard.as_ref() {
            return names.clone();
        }
        let names = MemberNames::from_members(&members);
        debug!("Cached {} member names", names.len());
        *guard = Some(names.clone());
        names
    }

    /// Replace the snapshot with names from `members`.
    pub async fn refresh(&self, members: &[LeagueMember]) {
        *self.snapshot.write().await = Some(MemberNames::from_members(members));
    }

    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    pub async fn is_cached(&self) -> bool {
        self.snapshot.read().await.is_some()
    }
}
