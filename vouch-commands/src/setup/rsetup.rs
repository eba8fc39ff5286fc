use tracing::info;
use vouch_core::Context;
use vouch_state::config::Configuration;
use vouch_utils::parse::{parse_channel_id, parse_reaction, parse_role_id, parse_target_user_id};

use crate::inbound::InboundMessage;
use crate::messages::{SETUP_COMPLETE_MESSAGE, unknown_role_message, usage_message};
use crate::setup::authorize;

pub const USAGE: &str = "!rsetup <#channel> <reaction> <@mention> <#warning-channel> \
     <@&role> <#notify-channel> <trigger phrase>";

/// Replace the active configuration after validating every argument.
pub async fn run(
    ctx: &Context,
    msg: &InboundMessage,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let platform = &ctx.platform;
    let Some(guild_id) = authorize(ctx, msg).await? else {
        return Ok(());
    };

    let Some(config) = parse_setup_args(arg1, arg_tail) else {
        let usage = usage_message(USAGE);
        platform.send_message(msg.channel_id, &usage).await?;
        return Ok(());
    };

    if platform.resolve_role(guild_id, config.role_id).await?.is_none() {
        platform
            .send_message(msg.channel_id, unknown_role_message())
            .await?;
        return Ok(());
    }

    info!(
        guild_id = guild_id.get(),
        channel_id = config.channel_id.get(),
        role_id = config.role_id.get(),
        "vouch configuration replaced"
    );
    ctx.state.config.replace(config).await;

    platform
        .send_message(msg.channel_id, SETUP_COMPLETE_MESSAGE)
        .await?;

    Ok(())
}

/// Parse `<#channel> <reaction> <@mention> <#warning> <@&role> <#notify> <phrase...>`.
pub fn parse_setup_args(arg1: Option<&str>, arg_tail: Option<&str>) -> Option<Configuration> {
    let channel_id = parse_channel_id(arg1?)?;
    let rest = arg_tail?;

    let (reaction_raw, rest) = next_token(rest)?;
    let (mention_raw, rest) = next_token(rest)?;
    let (warning_raw, rest) = next_token(rest)?;
    let (role_raw, rest) = next_token(rest)?;
    let (notify_raw, rest) = next_token(rest)?;

    let trigger_phrase = rest.trim().to_lowercase();
    if trigger_phrase.is_empty() {
        return None;
    }

    Some(Configuration {
        channel_id,
        reaction: parse_reaction(reaction_raw)?,
        trigger_phrase,
        mention_id: parse_target_user_id(mention_raw)?,
        warning_channel_id: parse_channel_id(warning_raw)?,
        role_id: parse_role_id(role_raw)?,
        notify_channel_id: parse_channel_id(notify_raw)?,
    })
}

fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }

    Some(input.split_once(char::is_whitespace).unwrap_or((input, "")))
}
