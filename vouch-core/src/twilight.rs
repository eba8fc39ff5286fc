use std::sync::Arc;

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::{
    channel::message::{MessageFlags, component::Component},
    http::interaction::{InteractionResponse, InteractionResponseType},
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;
use vouch_utils::parse::ReactionToken;

use crate::platform::{GuildRole, InteractionRef, Platform, PlatformError};

/// `Platform` backed by the shared Twilight HTTP client.
#[derive(Clone)]
pub struct TwilightPlatform {
    http: Arc<Client>,
}

impl TwilightPlatform {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Platform for TwilightPlatform {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<Id<MessageMarker>, PlatformError> {
        let message = self
            .http
            .create_message(channel_id)
            .content(content)
            .await?
            .model()
            .await?;

        Ok(message.id)
    }

    async fn send_with_components(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
        components: &[Component],
    ) -> Result<Id<MessageMarker>, PlatformError> {
        let message = self
            .http
            .create_message(channel_id)
            .content(content)
            .components(components)
            .await?
            .model()
            .await?;

        Ok(message.id)
    }

    async fn clear_components(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<(), PlatformError> {
        let empty_components: [Component; 0] = [];
        self.http
            .update_message(channel_id, message_id)
            .components(Some(&empty_components))
            .await?;

        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<(), PlatformError> {
        self.http.delete_message(channel_id, message_id).await?;

        Ok(())
    }

    async fn add_reaction(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reaction: &ReactionToken,
    ) -> Result<(), PlatformError> {
        let request = match reaction {
            ReactionToken::Unicode(name) => RequestReactionType::Unicode {
                name: name.as_str(),
            },
            ReactionToken::Custom { id, name, .. } => RequestReactionType::Custom {
                id: *id,
                name: name.as_deref(),
            },
        };

        self.http
            .create_reaction(channel_id, message_id, &request)
            .await?;

        Ok(())
    }

    async fn add_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), PlatformError> {
        self.http
            .add_guild_member_role(guild_id, user_id, role_id)
            .await?;

        Ok(())
    }

    async fn remove_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), PlatformError> {
        self.http
            .remove_guild_member_role(guild_id, user_id, role_id)
            .await?;

        Ok(())
    }

    async fn member_roles(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Vec<Id<RoleMarker>>, PlatformError> {
        let member = self
            .http
            .guild_member(guild_id, user_id)
            .await?
            .model()
            .await?;

        Ok(member.roles)
    }

    async fn guild_roles(
        &self,
        guild_id: Id<GuildMarker>,
    ) -> Result<Vec<GuildRole>, PlatformError> {
        let roles = self.http.roles(guild_id).await?.model().await?;

        Ok(roles
            .into_iter()
            .map(|role| GuildRole {
                id: role.id,
                name: role.name,
                permissions: role.permissions,
            })
            .collect())
    }

    async fn respond_ephemeral(
        &self,
        interaction: &InteractionRef,
        content: &str,
    ) -> Result<(), PlatformError> {
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(
                InteractionResponseDataBuilder::new()
                    .content(content)
                    .flags(MessageFlags::EPHEMERAL)
                    .build(),
            ),
        };

        self.http
            .interaction(interaction.application_id)
            .create_response(interaction.id, &interaction.token, &response)
            .await?;

        Ok(())
    }
}
