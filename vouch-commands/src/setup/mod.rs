pub mod note;
pub mod rsetup;
pub mod unnote;

use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{GuildMarker, UserMarker},
    },
};
use vouch_core::Context;
use vouch_utils::permissions::{grants, resolve_member_permissions};

use crate::inbound::InboundMessage;
use crate::messages::{guild_only_message, permission_denied_message};

/// Permission required for every operator command.
pub const OPERATOR_PERMISSION: Permissions = Permissions::MANAGE_GUILD;

/// Check whether a member may run operator commands.
pub async fn has_operator_permission(
    ctx: &Context,
    guild_id: Id<GuildMarker>,
    user_id: Id<UserMarker>,
) -> anyhow::Result<bool> {
    let member_roles = ctx.platform.member_roles(guild_id, user_id).await?;
    let guild_roles = ctx.platform.guild_roles(guild_id).await?;
    let perms = resolve_member_permissions(
        guild_id,
        &member_roles,
        guild_roles.into_iter().map(|role| (role.id, role.permissions)),
    );

    Ok(grants(perms, OPERATOR_PERMISSION))
}

/// Guild and permission gate shared by operator commands.
///
/// Replies to the invoker and returns `None` when the command must not proceed.
pub(crate) async fn authorize(
    ctx: &Context,
    msg: &InboundMessage,
) -> anyhow::Result<Option<Id<GuildMarker>>> {
    let platform = &ctx.platform;
    let Some(guild_id) = msg.guild_id else {
        platform
            .send_message(msg.channel_id, guild_only_message())
            .await?;
        return Ok(None);
    };

    if !has_operator_permission(ctx, guild_id, msg.author_id).await? {
        platform
            .send_message(msg.channel_id, permission_denied_message())
            .await?;
        return Ok(None);
    }

    Ok(Some(guild_id))
}
