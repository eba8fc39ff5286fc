/// Escalation button custom-id encoding and component builders.
pub mod interaction;
/// Canonical mention rendering.
pub mod mention;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
