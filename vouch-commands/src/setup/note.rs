use vouch_core::Context;
use vouch_utils::parse::parse_channel_id;

use crate::inbound::InboundMessage;
use crate::messages::{sticky_set_message, usage_message};
use crate::setup::authorize;
use crate::sticky::set_sticky;

pub const USAGE: &str = "!note <#channel> <message>";

pub async fn run(
    ctx: &Context,
    msg: &InboundMessage,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let platform = &ctx.platform;
    if authorize(ctx, msg).await?.is_none() {
        return Ok(());
    }

    let (Some(channel_id), Some(text)) = (arg1.and_then(parse_channel_id), arg_tail) else {
        let usage = usage_message(USAGE);
        platform.send_message(msg.channel_id, &usage).await?;
        return Ok(());
    };

    // Confirm first so a same-channel confirmation lands above the sticky.
    let confirmation = sticky_set_message(channel_id);
    platform.send_message(msg.channel_id, &confirmation).await?;
    set_sticky(ctx, channel_id, text).await?;

    Ok(())
}
