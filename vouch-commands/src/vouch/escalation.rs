//! Single-use revocation prompt posted when a watch escalates.

use tracing::{error, info, warn};
use twilight_model::id::{Id, marker::MessageMarker};
use vouch_core::Context;
use vouch_state::{config::Configuration, prompts::ConsumeOutcome};
use vouch_utils::interaction::{
    RevocationTarget, build_revocation_components, build_revocation_custom_id,
    parse_revocation_custom_id,
};

use crate::inbound::ButtonPress;
use crate::messages::{
    EXPIRY_PENALTY, EXPIRY_REASON, INVALID_INTERACTION_MESSAGE, NOT_ALLOWED_MESSAGE,
    PROMPT_STALE_MESSAGE, PROMPT_USED_MESSAGE, REVOKE_FAILED_MESSAGE, UNKNOWN_ACTOR_MESSAGE,
    revocation_confirmed, revocation_prompt,
};
use crate::vouch::issue_warning;
use crate::vouch::watch::RoleGrant;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActivationOutcome {
    Revoked,
    Unauthorized,
    AlreadyUsed,
    /// No open prompt exists for the pair, e.g. after a restart.
    Stale,
    Invalid,
    /// The role could not be removed; the prompt stays usable.
    Failed,
}

/// Post a revocation prompt for `grant` to the warning channel.
pub async fn publish_prompt(
    ctx: &Context,
    config: &Configuration,
    grant: &RoleGrant,
) -> anyhow::Result<Id<MessageMarker>> {
    let prompts = &ctx.state.prompts;
    prompts.open(grant.user_id, grant.role_id, grant.guild_id, &grant.role_name);

    let custom_id = build_revocation_custom_id(RevocationTarget {
        user_id: grant.user_id,
        role_id: grant.role_id,
    });
    let components = build_revocation_components(custom_id);
    let content = revocation_prompt(&grant.role_name, grant.user_id);

    let message_id = ctx
        .platform
        .send_with_components(config.warning_channel_id, &content, &components)
        .await?;
    prompts.attach_message(
        grant.user_id,
        grant.role_id,
        config.warning_channel_id,
        message_id,
    );

    Ok(message_id)
}

/// Handle a press on a revocation button.
pub async fn handle_activation(
    ctx: &Context,
    press: &ButtonPress,
) -> anyhow::Result<ActivationOutcome> {
    let platform = &ctx.platform;
    let interaction = &press.interaction;

    let Some(target) = parse_revocation_custom_id(&press.custom_id) else {
        platform
            .respond_ephemeral(interaction, INVALID_INTERACTION_MESSAGE)
            .await?;
        return Ok(ActivationOutcome::Invalid);
    };

    let Some(actor_id) = press.actor_id else {
        platform
            .respond_ephemeral(interaction, UNKNOWN_ACTOR_MESSAGE)
            .await?;
        return Ok(ActivationOutcome::Invalid);
    };

    if actor_id != target.user_id {
        platform
            .respond_ephemeral(interaction, NOT_ALLOWED_MESSAGE)
            .await?;
        return Ok(ActivationOutcome::Unauthorized);
    }

    let prompt = match ctx.state.prompts.consume(target.user_id, target.role_id) {
        ConsumeOutcome::Consumed(prompt) => prompt,
        ConsumeOutcome::AlreadyUsed => {
            platform
                .respond_ephemeral(interaction, PROMPT_USED_MESSAGE)
                .await?;
            return Ok(ActivationOutcome::AlreadyUsed);
        }
        ConsumeOutcome::Unknown => {
            platform
                .respond_ephemeral(interaction, PROMPT_STALE_MESSAGE)
                .await?;
            return Ok(ActivationOutcome::Stale);
        }
    };

    if let Err(source) = platform
        .remove_role(prompt.guild_id, target.user_id, target.role_id)
        .await
    {
        error!(?source, user_id = target.user_id.get(), "role revocation failed");
        ctx.state.prompts.release(target.user_id, target.role_id);
        platform
            .respond_ephemeral(interaction, REVOKE_FAILED_MESSAGE)
            .await?;
        return Ok(ActivationOutcome::Failed);
    }

    info!(
        user_id = target.user_id.get(),
        role_id = target.role_id.get(),
        "vouch role revoked after escalation"
    );

    let confirmation = revocation_confirmed(&prompt.role_name, target.user_id);
    platform.respond_ephemeral(interaction, &confirmation).await?;

    if let Some((channel_id, message_id)) = prompt.message
        && let Err(source) = platform.clear_components(channel_id, message_id).await
    {
        warn!(?source, "failed to remove revocation button");
    }

    let warning_channel = match prompt.message {
        Some((channel_id, _)) => Some(channel_id),
        None => ctx
            .state
            .config
            .active()
            .await
            .map(|config| config.warning_channel_id),
    };

    match warning_channel {
        Some(channel_id) => {
            issue_warning(
                ctx,
                channel_id,
                target.user_id,
                actor_id,
                EXPIRY_REASON,
                EXPIRY_PENALTY,
            )
            .await?;
        }
        None => warn!("no warning channel known, skipping expiry warning"),
    }

    Ok(ActivationOutcome::Revoked)
}
