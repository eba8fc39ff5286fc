use twilight_model::id::{
    Id,
    marker::{ChannelMarker, EmojiMarker, RoleMarker, UserMarker},
};

/// A reaction as configured by an operator: either a unicode emoji or a guild emoji.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReactionToken {
    Unicode(String),
    Custom {
        id: Id<EmojiMarker>,
        name: Option<String>,
        animated: bool,
    },
}

/// Parse a target user from a raw argument (`<@id>`, `<@!id>`, or raw ID).
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = if trimmed.starts_with("<@") && trimmed.ends_with('>') {
        let without_wrappers = trimmed.strip_prefix("<@")?.strip_suffix('>')?;
        without_wrappers
            .strip_prefix('!')
            .unwrap_or(without_wrappers)
    } else {
        trimmed
    };

    parse_snowflake(numeric)
}

/// Parse a channel from `<#id>` or a raw ID.
pub fn parse_channel_id(raw: &str) -> Option<Id<ChannelMarker>> {
    let trimmed = raw.trim();
    let numeric = match trimmed.strip_prefix("<#") {
        Some(rest) => rest.strip_suffix('>')?,
        None => trimmed,
    };

    parse_snowflake(numeric)
}

/// Parse a role from `<@&id>` or a raw ID.
pub fn parse_role_id(raw: &str) -> Option<Id<RoleMarker>> {
    let trimmed = raw.trim();
    let numeric = match trimmed.strip_prefix("<@&") {
        Some(rest) => rest.strip_suffix('>')?,
        None => trimmed,
    };

    parse_snowflake(numeric)
}

/// Parse a reaction token: `<:name:id>`, `<a:name:id>`, or a bare unicode emoji.
pub fn parse_reaction(raw: &str) -> Option<ReactionToken> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }

    let Some(inner) = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        if trimmed.contains(['<', '>', ':']) {
            return None;
        }
        return Some(ReactionToken::Unicode(trimmed.to_owned()));
    };

    let (animated, inner) = match inner.strip_prefix("a:") {
        Some(rest) => (true, rest),
        None => (false, inner.strip_prefix(':')?),
    };

    let (name, id_raw) = inner.split_once(':')?;
    let id = parse_snowflake(id_raw)?;
    let name = (!name.is_empty()).then(|| name.to_owned());

    Some(ReactionToken::Custom { id, name, animated })
}

fn parse_snowflake<T>(raw: &str) -> Option<Id<T>> {
    let value = raw.parse::<u64>().ok()?;
    Id::new_checked(value)
}
