use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
};

type PromptKey = (Id<UserMarker>, Id<RoleMarker>);

/// A single-use revocation prompt bound to one (user, role) pair.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscalationPrompt {
    pub guild_id: Id<GuildMarker>,
    pub role_name: String,
    /// Where the prompt was posted, once known.
    pub message: Option<(Id<ChannelMarker>, Id<MessageMarker>)>,
    pub consumed: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsumeOutcome {
    /// The prompt was open and is now consumed by this caller.
    Consumed(EscalationPrompt),
    AlreadyUsed,
    Unknown,
}

/// Open revocation prompts. A newer escalation for the same pair replaces the older prompt.
#[derive(Clone, Default)]
pub struct PromptRegistry {
    inner: Arc<Mutex<HashMap<PromptKey, EscalationPrompt>>>,
}

impl PromptRegistry {
    pub fn open(
        &self,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
        guild_id: Id<GuildMarker>,
        role_name: &str,
    ) {
        let prompt = EscalationPrompt {
            guild_id,
            role_name: role_name.to_owned(),
            message: None,
            consumed: false,
        };

        self.lock().insert((user_id, role_id), prompt);
    }

    pub fn attach_message(
        &self,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) {
        if let Some(prompt) = self.lock().get_mut(&(user_id, role_id)) {
            prompt.message = Some((channel_id, message_id));
        }
    }

    /// Check-and-flip the consumed flag under one lock acquisition.
    pub fn consume(&self, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) -> ConsumeOutcome {
        let mut prompts = self.lock();
        let Some(prompt) = prompts.get_mut(&(user_id, role_id)) else {
            return ConsumeOutcome::Unknown;
        };

        if prompt.consumed {
            return ConsumeOutcome::AlreadyUsed;
        }

        prompt.consumed = true;
        ConsumeOutcome::Consumed(prompt.clone())
    }

    /// Reopen a consumed prompt after the revocation itself failed.
    pub fn release(&self, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) {
        if let Some(prompt) = self.lock().get_mut(&(user_id, role_id)) {
            prompt.consumed = false;
        }
    }

    pub fn get(
        &self,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Option<EscalationPrompt> {
        self.lock().get(&(user_id, role_id)).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PromptKey, EscalationPrompt>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
