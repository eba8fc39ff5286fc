//! User-facing moderation text. Pure templates, no HTTP.

use std::time::Duration;

use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};
use vouch_utils::mention::{channel_mention, user_mention};

/// Penalty shown on ordinary format warnings.
pub const DEFAULT_PENALTY: &str = "warning";
pub const WRONG_FORMAT_REASON: &str = "wrong vouching format";
pub const NO_IMAGE_REASON: &str = "no image attached";
pub const EXPIRY_REASON: &str = "24 hours no vouch";
pub const EXPIRY_PENALTY: &str = "warranty voided";

pub const NOT_ALLOWED_MESSAGE: &str = "❌ you are not allowed to press this.";
pub const PROMPT_USED_MESSAGE: &str = "this prompt has already been used.";
pub const PROMPT_STALE_MESSAGE: &str = "this prompt is no longer active.";
pub const INVALID_INTERACTION_MESSAGE: &str = "Invalid escalation interaction.";
pub const UNKNOWN_ACTOR_MESSAGE: &str = "Unable to determine interaction user.";
pub const REVOKE_FAILED_MESSAGE: &str =
    "I couldn't remove that role. Check role hierarchy and permissions.";
pub const SETUP_COMPLETE_MESSAGE: &str = "✅ reaction bot setup complete!";

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{usage}`")
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn permission_denied_message() -> &'static str {
    "You are not permitted to use this command."
}

pub fn unknown_role_message() -> &'static str {
    "That role doesn't exist in this server."
}

pub fn warning_notice(offender: Id<UserMarker>, penalty: &str, reason: &str) -> String {
    format!(
        "**oh no, looks like you didn't follow the rules!**\n\n\
         **offender** : {}\n\
         **penalty** : {}\n\
         **reason** : {}",
        user_mention(offender),
        penalty,
        reason
    )
}

pub fn grant_announcement(role_name: &str, user_id: Id<UserMarker>) -> String {
    format!("✅ role **{role_name}** added to {}.", user_mention(user_id))
}

pub fn escalation_notice(user_id: Id<UserMarker>, role_name: &str, deadline: Duration) -> String {
    format!(
        "⚠️ {} passed and {} still has the role **{role_name}**.",
        describe_duration(deadline),
        user_mention(user_id)
    )
}

pub fn revocation_prompt(role_name: &str, user_id: Id<UserMarker>) -> String {
    format!(
        "⚠️ click the button below to remove **{role_name}** from {} and issue a warning.",
        user_mention(user_id)
    )
}

pub fn revocation_confirmed(role_name: &str, user_id: Id<UserMarker>) -> String {
    format!("✅ removed **{role_name}** from {}", user_mention(user_id))
}

pub fn sticky_set_message(channel_id: Id<ChannelMarker>) -> String {
    format!("sticky message set for {}", channel_mention(channel_id))
}

pub fn sticky_removed_message(channel_id: Id<ChannelMarker>) -> String {
    format!("sticky message removed from {}", channel_mention(channel_id))
}

pub fn sticky_not_set_message(channel_id: Id<ChannelMarker>) -> String {
    format!("no sticky message set for {}", channel_mention(channel_id))
}

/// Render a deadline in the largest whole unit, e.g. `24 hours`.
pub fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (amount, unit) = if secs >= 3_600 && secs % 3_600 == 0 {
        (secs / 3_600, "hour")
    } else if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };

    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
