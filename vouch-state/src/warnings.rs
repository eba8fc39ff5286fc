use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use tokio::sync::RwLock;

#[derive(Clone, Debug)]
pub struct WarningEntry {
    pub warned_at: u64,
    /// User whose action produced the warning.
    pub actor_id: u64,
    pub reason: String,
    pub penalty: String,
}

#[derive(Clone, Copy, Debug)]
pub struct WarningRecord {
    pub warn_number: usize,
}

/// Formal warnings issued during this process lifetime, keyed by offender.
#[derive(Clone, Default)]
pub struct WarningLog {
    inner: Arc<RwLock<HashMap<u64, Vec<WarningEntry>>>>,
}

impl WarningLog {
    /// Record a warning for a target user and return the new warning number.
    pub async fn record_warning(
        &self,
        user_id: u64,
        actor_id: u64,
        reason: &str,
        penalty: &str,
    ) -> WarningRecord {
        let entry = WarningEntry {
            warned_at: now_unix_secs(),
            actor_id,
            reason: reason.to_owned(),
            penalty: penalty.to_owned(),
        };

        let mut store = self.inner.write().await;
        let entries = store.entry(user_id).or_default();
        entries.push(entry);

        WarningRecord {
            warn_number: entries.len(),
        }
    }

    /// Return warning entries for a target user, oldest first.
    pub async fn warnings_for(&self, user_id: u64) -> Vec<WarningEntry> {
        let store = self.inner.read().await;
        let mut entries = store.get(&user_id).cloned().unwrap_or_default();

        entries.sort_by_key(|entry| entry.warned_at);
        entries
    }
}

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
