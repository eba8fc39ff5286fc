//! Vouch channel moderation: validation, role grant, expiry watch, escalation.

pub mod escalation;
pub mod lifecycle;
pub mod validator;
pub mod watch;

use tracing::{debug, info};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};
use vouch_core::Context;
use vouch_state::warnings::WarningRecord;

use crate::inbound::InboundMessage;
use crate::messages::{DEFAULT_PENALTY, warning_notice};
use lifecycle::GrantOutcome;
use validator::{Rejection, Submission, Verdict};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
    /// Inactive configuration, or a message outside the monitored channel.
    Ignored,
    Rejected(Rejection),
    Accepted(GrantOutcome),
}

/// Evaluate a message from the monitored channel and act on the verdict.
pub async fn handle_submission(
    ctx: &Context,
    message: &InboundMessage,
) -> anyhow::Result<SubmissionOutcome> {
    let Some(config) = ctx.state.config.active().await else {
        return Ok(SubmissionOutcome::Ignored);
    };

    if message.channel_id != config.channel_id {
        return Ok(SubmissionOutcome::Ignored);
    }

    let submission = Submission::from_message(message);
    match validator::validate(&submission, &config) {
        Verdict::Rejected(rejection) => {
            debug!(
                user_id = submission.author_id.get(),
                %rejection,
                "submission rejected"
            );
            issue_warning(
                ctx,
                config.warning_channel_id,
                submission.author_id,
                submission.author_id,
                rejection.public_reason(),
                DEFAULT_PENALTY,
            )
            .await?;
            Ok(SubmissionOutcome::Rejected(rejection))
        }
        Verdict::Accepted => {
            let outcome = lifecycle::grant_for_submission(ctx, message, &config).await?;
            Ok(SubmissionOutcome::Accepted(outcome))
        }
    }
}

/// Post a warning notice and append it to the warning log.
///
/// Nothing is logged when the notice could not be posted.
pub(crate) async fn issue_warning(
    ctx: &Context,
    channel_id: Id<ChannelMarker>,
    offender: Id<UserMarker>,
    actor: Id<UserMarker>,
    reason: &str,
    penalty: &str,
) -> anyhow::Result<WarningRecord> {
    let notice = warning_notice(offender, penalty, reason);
    ctx.platform.send_message(channel_id, &notice).await?;
    let record = ctx
        .state
        .warnings
        .record_warning(offender.get(), actor.get(), reason, penalty)
        .await;

    info!(
        user_id = offender.get(),
        warn_number = record.warn_number,
        reason,
        "warning issued"
    );

    Ok(record)
}
