use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};

/// Render a user mention in the form Discord clients emit (`<@id>`).
pub fn user_mention(user_id: Id<UserMarker>) -> String {
    format!("<@{}>", user_id.get())
}

pub fn channel_mention(channel_id: Id<ChannelMarker>) -> String {
    format!("<#{}>", channel_id.get())
}
