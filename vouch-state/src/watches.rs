use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use twilight_model::id::{
    Id,
    marker::{RoleMarker, UserMarker},
};

type WatchKey = (Id<UserMarker>, Id<RoleMarker>);

/// (user, role) pairs with a live expiry watch.
///
/// Each slot carries a pending re-grant flag, set when the role is granted again
/// while the watch for that pair is still running.
#[derive(Clone, Default)]
pub struct WatchRegistry {
    live: Arc<Mutex<HashMap<WatchKey, bool>>>,
}

impl WatchRegistry {
    /// Claim the watch slot for a pair.
    ///
    /// If a watch is already live, returns `None` and flags the pair as re-granted
    /// so the running watch adopts the new grant instead of ending. The slot is
    /// released when the returned claim is dropped.
    pub fn try_claim(
        &self,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Option<WatchClaim> {
        let key = (user_id, role_id);
        let mut live = self.lock();

        if let Some(regranted) = live.get_mut(&key) {
            *regranted = true;
            return None;
        }

        live.insert(key, false);
        Some(WatchClaim {
            registry: self.clone(),
            key,
            released: false,
        })
    }

    pub fn is_live(&self, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) -> bool {
        self.lock().contains_key(&(user_id, role_id))
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<WatchKey, bool>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive ownership of one (user, role) watch slot.
pub struct WatchClaim {
    registry: WatchRegistry,
    key: WatchKey,
    released: bool,
}

impl WatchClaim {
    /// Take the pending re-grant flag, clearing it.
    pub fn take_regrant(&self) -> bool {
        self.registry
            .lock()
            .get_mut(&self.key)
            .is_some_and(|regranted| std::mem::take(regranted))
    }

    /// Release the slot unless a re-grant is pending.
    ///
    /// Returns `false`, with the flag cleared and the slot still held, when the
    /// pair was re-granted; the caller must keep watching.
    pub fn try_release(&mut self) -> bool {
        let mut live = self.registry.lock();
        if let Some(regranted) = live.get_mut(&self.key)
            && std::mem::take(regranted)
        {
            return false;
        }

        live.remove(&self.key);
        self.released = true;
        true
    }
}

impl Drop for WatchClaim {
    fn drop(&mut self) {
        if !self.released {
            self.registry.lock().remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_first_is_dropped() {
        let registry = WatchRegistry::default();
        let (user, role) = (Id::new(1), Id::new(2));

        let claim = registry.try_claim(user, role);
        assert!(claim.is_some());
        assert!(registry.try_claim(user, role).is_none());
        assert!(registry.is_live(user, role));

        let other = registry.try_claim(user, Id::new(3));
        assert!(other.is_some());
        assert_eq!(registry.live_count(), 2);

        drop(claim);
        assert!(!registry.is_live(user, role));
        assert!(registry.try_claim(user, role).is_some());
    }

    #[test]
    fn refused_claim_keeps_the_live_watch_from_releasing() {
        let registry = WatchRegistry::default();
        let (user, role) = (Id::new(1), Id::new(2));

        let mut claim = registry.try_claim(user, role).unwrap();
        assert!(registry.try_claim(user, role).is_none());

        assert!(!claim.try_release());
        assert!(registry.is_live(user, role));

        assert!(claim.try_release());
        assert!(!registry.is_live(user, role));

        // A newer claim must survive the old one being dropped.
        let fresh = registry.try_claim(user, role);
        assert!(fresh.is_some());
        drop(claim);
        assert!(registry.is_live(user, role));
    }

    #[test]
    fn taking_the_regrant_flag_clears_it() {
        let registry = WatchRegistry::default();
        let (user, role) = (Id::new(1), Id::new(2));

        let claim = registry.try_claim(user, role).unwrap();
        assert!(!claim.take_regrant());

        assert!(registry.try_claim(user, role).is_none());
        assert!(claim.take_regrant());
        assert!(!claim.take_regrant());
    }
}
