use std::sync::Arc;

use tokio::sync::RwLock;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, RoleMarker, UserMarker},
};
use vouch_utils::parse::ReactionToken;

/// The active vouch-monitoring rule set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Configuration {
    /// Channel whose messages are evaluated as submissions.
    pub channel_id: Id<ChannelMarker>,
    /// Reaction added to accepted submissions.
    pub reaction: ReactionToken,
    /// Required phrase, stored lower-cased.
    pub trigger_phrase: String,
    /// User that every submission must mention.
    pub mention_id: Id<UserMarker>,
    /// Channel receiving warnings and revocation prompts.
    pub warning_channel_id: Id<ChannelMarker>,
    /// Role granted on acceptance and revoked on escalation.
    pub role_id: Id<RoleMarker>,
    /// Channel receiving grant announcements and escalation notices.
    pub notify_channel_id: Id<ChannelMarker>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ConfigState {
    #[default]
    Inactive,
    Active(Configuration),
}

/// Single-record, last-writer-wins configuration store.
#[derive(Clone, Default)]
pub struct ConfigStore {
    inner: Arc<RwLock<ConfigState>>,
}

impl ConfigStore {
    /// Atomically replace the whole record.
    pub async fn replace(&self, config: Configuration) {
        *self.inner.write().await = ConfigState::Active(config);
    }

    pub async fn state(&self) -> ConfigState {
        self.inner.read().await.clone()
    }

    /// Snapshot of the active configuration, if any.
    pub async fn active(&self) -> Option<Configuration> {
        match &*self.inner.read().await {
            ConfigState::Active(config) => Some(config.clone()),
            ConfigState::Inactive => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(phrase: &str) -> Configuration {
        Configuration {
            channel_id: Id::new(1),
            reaction: ReactionToken::Unicode("✅".to_owned()),
            trigger_phrase: phrase.to_owned(),
            mention_id: Id::new(2),
            warning_channel_id: Id::new(3),
            role_id: Id::new(4),
            notify_channel_id: Id::new(5),
        }
    }

    #[tokio::test]
    async fn starts_inactive_and_last_write_wins() {
        let store = ConfigStore::default();
        assert_eq!(store.state().await, ConfigState::Inactive);
        assert!(store.active().await.is_none());

        store.replace(sample("vouch for")).await;
        store.replace(sample("legit")).await;

        let active = store.active().await.expect("configuration should be active");
        assert_eq!(active.trigger_phrase, "legit");
    }
}
