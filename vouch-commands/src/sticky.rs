//! Keeps a designated message at the bottom of its channel by delete-and-resend.

use tracing::debug;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};
use vouch_core::{Context, PlatformError};
use vouch_state::sticky::StickyEntry;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClearOutcome {
    Cleared,
    NotSet,
}

/// Replace the channel's sticky text and display it immediately.
pub async fn set_sticky(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    text: &str,
) -> anyhow::Result<Id<MessageMarker>> {
    let stickies = &ctx.state.stickies;

    // The entry keeps tracking the old instance until it is actually gone.
    if let Some(previous) = stickies.get(channel_id).await
        && let Some(message_id) = previous.displayed
    {
        delete_tolerant(ctx, channel_id, message_id).await?;
    }

    let entry = StickyEntry {
        text: text.to_owned(),
        displayed: None,
    };
    stickies.insert(channel_id, entry).await;

    let message_id = ctx.platform.send_message(channel_id, text).await?;
    stickies.set_displayed(channel_id, message_id).await;

    Ok(message_id)
}

/// Remove the channel's sticky entry and its displayed message.
pub async fn clear_sticky(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
) -> anyhow::Result<ClearOutcome> {
    let Some(entry) = ctx.state.stickies.remove(channel_id).await else {
        return Ok(ClearOutcome::NotSet);
    };

    if let Some(message_id) = entry.displayed {
        delete_tolerant(ctx, channel_id, message_id).await?;
    }

    Ok(ClearOutcome::Cleared)
}

/// Re-post the sticky after a newer message lands in its channel.
///
/// Returns whether the sticky was re-posted. Messages no newer than the displayed
/// instance, including the instance itself, are ignored.
pub async fn on_new_message(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
) -> anyhow::Result<bool> {
    let stickies = &ctx.state.stickies;
    let Some(entry) = stickies.get(channel_id).await else {
        return Ok(false);
    };

    if let Some(displayed) = entry.displayed {
        if displayed >= message_id {
            return Ok(false);
        }

        delete_tolerant(ctx, channel_id, displayed).await?;
    }

    let resent = ctx.platform.send_message(channel_id, &entry.text).await?;
    stickies.set_displayed(channel_id, resent).await;

    Ok(true)
}

async fn delete_tolerant(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    message_id: Id<MessageMarker>,
) -> Result<(), PlatformError> {
    match ctx.platform.delete_message(channel_id, message_id).await {
        Ok(()) => Ok(()),
        Err(PlatformError::NotFound) => {
            debug!(
                channel_id = channel_id.get(),
                message_id = message_id.get(),
                "sticky instance already gone"
            );
            Ok(())
        }
        Err(source) => Err(source),
    }
}
