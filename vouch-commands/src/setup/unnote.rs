use vouch_core::Context;
use vouch_utils::parse::parse_channel_id;

use crate::inbound::InboundMessage;
use crate::messages::{sticky_not_set_message, sticky_removed_message, usage_message};
use crate::setup::authorize;
use crate::sticky::{ClearOutcome, clear_sticky};

pub const USAGE: &str = "!unnote <#channel>";

pub async fn run(
    ctx: &Context,
    msg: &InboundMessage,
    arg1: Option<&str>,
) -> anyhow::Result<()> {
    let platform = &ctx.platform;
    if authorize(ctx, msg).await?.is_none() {
        return Ok(());
    }

    let Some(channel_id) = arg1.and_then(parse_channel_id) else {
        let usage = usage_message(USAGE);
        platform.send_message(msg.channel_id, &usage).await?;
        return Ok(());
    };

    let reply = match clear_sticky(ctx, channel_id).await? {
        ClearOutcome::Cleared => sticky_removed_message(channel_id),
        ClearOutcome::NotSet => sticky_not_set_message(channel_id),
    };
    platform.send_message(msg.channel_id, &reply).await?;

    Ok(())
}
