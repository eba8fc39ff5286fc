use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StickyEntry {
    pub text: String,
    /// The message currently displaying `text`, if one was sent successfully.
    pub displayed: Option<Id<MessageMarker>>,
}

/// Sticky entries keyed by channel.
#[derive(Clone, Default)]
pub struct StickyStore {
    inner: Arc<RwLock<HashMap<Id<ChannelMarker>, StickyEntry>>>,
}

impl StickyStore {
    pub async fn get(&self, channel_id: Id<ChannelMarker>) -> Option<StickyEntry> {
        self.inner.read().await.get(&channel_id).cloned()
    }

    /// Insert or replace the entry for a channel, returning the previous one.
    pub async fn insert(
        &self,
        channel_id: Id<ChannelMarker>,
        entry: StickyEntry,
    ) -> Option<StickyEntry> {
        self.inner.write().await.insert(channel_id, entry)
    }

    /// Record a newly displayed instance; ignored if the entry was removed meanwhile.
    pub async fn set_displayed(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> bool {
        match self.inner.write().await.get_mut(&channel_id) {
            Some(entry) => {
                entry.displayed = Some(message_id);
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, channel_id: Id<ChannelMarker>) -> Option<StickyEntry> {
        self.inner.write().await.remove(&channel_id)
    }
}
