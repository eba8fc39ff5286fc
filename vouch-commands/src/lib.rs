pub mod inbound;
pub mod messages;
pub mod setup;
pub mod sticky;
pub mod vouch;

#[cfg(test)]
mod test_support;

use tracing::error;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use inbound::{ButtonPress, InboundMessage};
use vouch_core::Context;
use vouch_utils::COMMAND_PREFIX;
use vouch_utils::interaction::ESCALATION_CUSTOM_ID_PREFIX;

#[derive(Clone, Copy)]
enum InteractionRoute {
    EscalationButtons,
}

fn route_interaction(custom_id: &str) -> Option<InteractionRoute> {
    const ROUTES: [(&str, InteractionRoute); 1] = [(
        ESCALATION_CUSTOM_ID_PREFIX,
        InteractionRoute::EscalationButtons,
    )];

    ROUTES
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(prefix).then_some(route))
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let message = InboundMessage::from(&*msg);
    dispatch_message(&ctx, &message).await
}

/// Route one inbound message through commands, submission checks and sticky upkeep.
///
/// Each stage contains its own failure so the next stage still runs.
pub async fn dispatch_message(ctx: &Context, message: &InboundMessage) -> anyhow::Result<()> {
    if message.author_is_bot {
        return Ok(());
    }

    let is_command = match run_command(ctx, message).await {
        Ok(is_command) => is_command,
        Err(source) => {
            error!(?source, message_id = message.id.get(), "command failed");
            true
        }
    };

    if !is_command
        && let Err(source) = vouch::handle_submission(ctx, message).await
    {
        error!(?source, message_id = message.id.get(), "submission handling failed");
    }

    if let Err(source) = sticky::on_new_message(ctx, message.channel_id, message.id).await {
        error!(?source, channel_id = message.channel_id.get(), "sticky upkeep failed");
    }

    Ok(())
}

/// Run a prefix command. Returns `Ok(false)` when the message is not a known command.
async fn run_command(ctx: &Context, msg: &InboundMessage) -> anyhow::Result<bool> {
    let content = msg.content.trim();

    if !content.starts_with(COMMAND_PREFIX) {
        return Ok(false);
    }

    let content = content.trim_start_matches(COMMAND_PREFIX).trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());

            (first, tail)
        }
        None => (None, None),
    };

    match cmd.as_str() {
        "rsetup" => setup::rsetup::run(ctx, msg, arg1, arg_tail).await?,
        "note" => setup::note::run(ctx, msg, arg1, arg_tail).await?,
        "unnote" => setup::unnote::run(ctx, msg, arg1).await?,
        // Add new commands here
        _ => return Ok(false),
    }

    Ok(true)
}

pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(press) = ButtonPress::from_interaction(&interaction) else {
        return Ok(());
    };

    dispatch_button(&ctx, &press).await
}

pub async fn dispatch_button(ctx: &Context, press: &ButtonPress) -> anyhow::Result<()> {
    let Some(route) = route_interaction(&press.custom_id) else {
        return Ok(());
    };

    match route {
        InteractionRoute::EscalationButtons => {
            let _outcome = vouch::escalation::handle_activation(ctx, press).await?;
        }
    }

    Ok(())
}
