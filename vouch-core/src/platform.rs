//! Outbound calls the moderation engine makes against Discord.

use async_trait::async_trait;
use thiserror::Error;
use twilight_http::{error::ErrorType, response::DeserializeBodyError};
use twilight_model::{
    channel::message::component::Component,
    gateway::payload::incoming::InteractionCreate,
    guild::Permissions,
    id::{
        Id,
        marker::{
            ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, MessageMarker,
            RoleMarker, UserMarker,
        },
    },
};
use vouch_utils::parse::ReactionToken;

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The message, member or role no longer exists.
    #[error("resource not found")]
    NotFound,
    /// The bot lacks the permission or role hierarchy for the request.
    #[error("missing permissions")]
    Forbidden,
    #[error("discord request failed")]
    Http(#[source] twilight_http::Error),
    #[error("failed to deserialize discord response")]
    Deserialize(#[from] DeserializeBodyError),
}

impl From<twilight_http::Error> for PlatformError {
    fn from(source: twilight_http::Error) -> Self {
        if let ErrorType::Response { status, .. } = source.kind() {
            match status.get() {
                403 => return Self::Forbidden,
                404 => return Self::NotFound,
                _ => {}
            }
        }

        Self::Http(source)
    }
}

/// The subset of a guild role the engine cares about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuildRole {
    pub id: Id<RoleMarker>,
    pub name: String,
    pub permissions: Permissions,
}

/// Everything needed to answer an interaction after the event itself is gone.
#[derive(Clone, Debug)]
pub struct InteractionRef {
    pub application_id: Id<ApplicationMarker>,
    pub id: Id<InteractionMarker>,
    pub token: String,
}

impl From<&InteractionCreate> for InteractionRef {
    fn from(interaction: &InteractionCreate) -> Self {
        Self {
            application_id: interaction.application_id,
            id: interaction.id,
            token: interaction.token.clone(),
        }
    }
}

#[async_trait]
pub trait Platform: Send + Sync {
    /// Send a plain message and return its ID.
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<Id<MessageMarker>, PlatformError>;

    /// Send a message carrying interactive components and return its ID.
    async fn send_with_components(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
        components: &[Component],
    ) -> Result<Id<MessageMarker>, PlatformError>;

    /// Strip every component from an existing message.
    async fn clear_components(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<(), PlatformError>;

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<(), PlatformError>;

    async fn add_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reaction: &ReactionToken,
    ) -> Result<(), PlatformError>;

    async fn add_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), PlatformError>;

    async fn remove_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), PlatformError>;

    /// Live role list of a guild member.
    async fn member_roles(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Vec<Id<RoleMarker>>, PlatformError>;

    async fn guild_roles(
        &self,
        guild_id: Id<GuildMarker>,
    ) -> Result<Vec<GuildRole>, PlatformError>;

    /// Answer an interaction with a message only the activator can see.
    async fn respond_ephemeral(
        &self,
        interaction: &InteractionRef,
        content: &str,
    ) -> Result<(), PlatformError>;

    /// Resolve a role by ID within a guild.
    async fn resolve_role(
        &self,
        guild_id: Id<GuildMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<Option<GuildRole>, PlatformError> {
        let roles = self.guild_roles(guild_id).await?;
        Ok(roles.into_iter().find(|role| role.id == role_id))
    }
}
