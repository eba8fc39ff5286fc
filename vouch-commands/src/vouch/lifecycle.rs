use tracing::{debug, info};
use vouch_core::Context;
use vouch_state::config::Configuration;

use crate::inbound::InboundMessage;
use crate::messages::grant_announcement;
use crate::vouch::watch::{self, RoleGrant};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GrantOutcome {
    /// Role granted and announced. `watch_started` is false when a watch for the
    /// pair was still live; that watch adopts the grant and restarts its deadline.
    Granted { watch_started: bool },
    AlreadyHeld,
    /// The configured role does not exist in the message's guild.
    RoleUnresolved,
}

/// React to an accepted submission and grant the managed role if the author lacks it.
pub async fn grant_for_submission(
    ctx: &Context,
    message: &InboundMessage,
    config: &Configuration,
) -> anyhow::Result<GrantOutcome> {
    let platform = &ctx.platform;

    platform
        .add_reaction(message.channel_id, message.id, &config.reaction)
        .await?;

    let Some(guild_id) = message.guild_id else {
        return Ok(GrantOutcome::RoleUnresolved);
    };

    let Some(role) = platform.resolve_role(guild_id, config.role_id).await? else {
        debug!(
            role_id = config.role_id.get(),
            guild_id = guild_id.get(),
            "configured role not found, skipping grant"
        );
        return Ok(GrantOutcome::RoleUnresolved);
    };

    let member_roles = platform.member_roles(guild_id, message.author_id).await?;
    if member_roles.contains(&role.id) {
        return Ok(GrantOutcome::AlreadyHeld);
    }

    platform.add_role(guild_id, message.author_id, role.id).await?;
    info!(
        user_id = message.author_id.get(),
        role_id = role.id.get(),
        "granted vouch role"
    );

    // Start the watch before announcing so a failed announcement never leaves a grant unwatched.
    let grant = RoleGrant::new(guild_id, message.author_id, role.id, role.name.clone());
    let watch_started = watch::start(ctx, grant).is_some();

    let announcement = grant_announcement(&role.name, message.author_id);
    platform
        .send_message(config.notify_channel_id, &announcement)
        .await?;

    Ok(GrantOutcome::Granted { watch_started })
}
