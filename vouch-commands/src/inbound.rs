//! Platform-neutral views of the gateway events the engine consumes.

use twilight_model::{
    application::interaction::InteractionData,
    gateway::payload::incoming::{InteractionCreate, MessageCreate},
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker},
    },
};
use vouch_core::InteractionRef;

#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub author_id: Id<UserMarker>,
    pub author_is_bot: bool,
    pub content: String,
    pub attachment_count: usize,
}

impl From<&MessageCreate> for InboundMessage {
    fn from(msg: &MessageCreate) -> Self {
        Self {
            id: msg.id,
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
            author_id: msg.author.id,
            author_is_bot: msg.author.bot,
            content: msg.content.clone(),
            attachment_count: msg.attachments.len(),
        }
    }
}

/// A message-component activation.
#[derive(Clone, Debug)]
pub struct ButtonPress {
    pub interaction: InteractionRef,
    pub actor_id: Option<Id<UserMarker>>,
    pub custom_id: String,
}

impl ButtonPress {
    /// Returns `None` for anything that is not a message-component interaction.
    pub fn from_interaction(interaction: &InteractionCreate) -> Option<Self> {
        let Some(InteractionData::MessageComponent(data)) = interaction.data.as_ref() else {
            return None;
        };

        Some(Self {
            interaction: InteractionRef::from(interaction),
            actor_id: interaction.author_id(),
            custom_id: data.custom_id.clone(),
        })
    }
}
