//! Recording `Platform` fake and fixtures shared by the engine tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use twilight_model::{
    channel::message::component::Component,
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
    },
};
use vouch_core::{Context, GuildRole, InteractionRef, Platform, PlatformError, WatchTiming};
use vouch_state::{State, config::Configuration};
use vouch_utils::parse::ReactionToken;

use crate::inbound::{ButtonPress, InboundMessage};

pub const GUILD: Id<GuildMarker> = Id::new(1);
pub const VOUCH_CHANNEL: Id<ChannelMarker> = Id::new(10);
pub const WARNING_CHANNEL: Id<ChannelMarker> = Id::new(11);
pub const NOTIFY_CHANNEL: Id<ChannelMarker> = Id::new(12);
pub const OTHER_CHANNEL: Id<ChannelMarker> = Id::new(13);
pub const SELLER: Id<UserMarker> = Id::new(20);
pub const BUYER: Id<UserMarker> = Id::new(21);
pub const STRANGER: Id<UserMarker> = Id::new(22);
pub const ADMIN: Id<UserMarker> = Id::new(23);
pub const PENDING_ROLE: Id<RoleMarker> = Id::new(30);
pub const ADMIN_ROLE: Id<RoleMarker> = Id::new(31);

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    Send {
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        content: String,
    },
    SendWithComponents {
        channel_id: Id<ChannelMarker>,
        content: String,
        custom_ids: Vec<String>,
    },
    ClearComponents {
        message_id: Id<MessageMarker>,
    },
    Delete {
        message_id: Id<MessageMarker>,
    },
    React {
        message_id: Id<MessageMarker>,
        reaction: ReactionToken,
    },
    AddRole {
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    },
    RemoveRole {
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    },
    Ephemeral {
        content: String,
    },
}

pub struct FakePlatform {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicU64,
    roles: Mutex<Vec<GuildRole>>,
    members: Mutex<HashMap<Id<UserMarker>, Vec<Id<RoleMarker>>>>,
    live_messages: Mutex<HashSet<Id<MessageMarker>>>,
    failing_sends: Mutex<HashSet<Id<ChannelMarker>>>,
    failing_deletes: Mutex<HashSet<Id<ChannelMarker>>>,
    failing_role_polls: AtomicUsize,
    role_poll_delay: Mutex<Duration>,
}

impl FakePlatform {
    /// A guild with the pending role, an admin role, and three ordinary members.
    pub fn new() -> Arc<Self> {
        let roles = vec![
            GuildRole {
                id: GUILD.cast(),
                name: "@everyone".to_owned(),
                permissions: Permissions::SEND_MESSAGES,
            },
            GuildRole {
                id: PENDING_ROLE,
                name: "Vouch Pending".to_owned(),
                permissions: Permissions::empty(),
            },
            GuildRole {
                id: ADMIN_ROLE,
                name: "Staff".to_owned(),
                permissions: Permissions::MANAGE_GUILD,
            },
        ];
        let members = HashMap::from([
            (SELLER, Vec::new()),
            (BUYER, Vec::new()),
            (STRANGER, Vec::new()),
            (ADMIN, vec![ADMIN_ROLE]),
        ]);

        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1_000),
            roles: Mutex::new(roles),
            members: Mutex::new(members),
            live_messages: Mutex::new(HashSet::new()),
            failing_sends: Mutex::new(HashSet::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            failing_role_polls: AtomicUsize::new(0),
            role_poll_delay: Mutex::new(Duration::ZERO),
        })
    }

    /// Mint an ID newer than every message sent so far.
    pub fn mint_message_id(&self) -> Id<MessageMarker> {
        Id::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn sent_to(&self, channel: Id<ChannelMarker>) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send {
                    channel_id,
                    content,
                    ..
                } if channel_id == channel => Some(content),
                Call::SendWithComponents {
                    channel_id,
                    content,
                    ..
                } if channel_id == channel => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub fn ephemerals(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Ephemeral { content } => Some(content),
                _ => None,
            })
            .collect()
    }

    pub fn prompt_custom_ids(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .flat_map(|call| match call {
                Call::SendWithComponents { custom_ids, .. } => custom_ids,
                _ => Vec::new(),
            })
            .collect()
    }

    pub fn is_live(&self, message_id: Id<MessageMarker>) -> bool {
        self.live_messages.lock().unwrap().contains(&message_id)
    }

    pub fn holds_role(&self, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) -> bool {
        self.members
            .lock()
            .unwrap()
            .get(&user_id)
            .is_some_and(|roles| roles.contains(&role_id))
    }

    /// Simulate a moderator removing a role outside the bot.
    pub fn strip_role(&self, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) {
        if let Some(roles) = self.members.lock().unwrap().get_mut(&user_id) {
            roles.retain(|role| *role != role_id);
        }
    }

    pub fn give_role(&self, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) {
        if let Some(roles) = self.members.lock().unwrap().get_mut(&user_id) {
            roles.push(role_id);
        }
    }

    pub fn remove_member(&self, user_id: Id<UserMarker>) {
        self.members.lock().unwrap().remove(&user_id);
    }

    pub fn delete_guild_role(&self, role_id: Id<RoleMarker>) {
        self.roles.lock().unwrap().retain(|role| role.id != role_id);
    }

    /// Make every send to `channel_id` fail with `Forbidden` until restored.
    pub fn fail_sends_to(&self, channel_id: Id<ChannelMarker>) {
        self.failing_sends.lock().unwrap().insert(channel_id);
    }

    /// Make every delete in `channel_id` fail with `Forbidden` until restored.
    pub fn fail_deletes_in(&self, channel_id: Id<ChannelMarker>) {
        self.failing_deletes.lock().unwrap().insert(channel_id);
    }

    pub fn restore_channel(&self, channel_id: Id<ChannelMarker>) {
        self.failing_sends.lock().unwrap().remove(&channel_id);
        self.failing_deletes.lock().unwrap().remove(&channel_id);
    }

    /// Fail the next `count` member role lookups.
    pub fn fail_role_polls(&self, count: usize) {
        self.failing_role_polls.store(count, Ordering::SeqCst);
    }

    /// Delay member role answers; the roles are read before the delay.
    pub fn delay_role_polls(&self, delay: Duration) {
        *self.role_poll_delay.lock().unwrap() = delay;
    }

    fn check_send(&self, channel_id: Id<ChannelMarker>) -> Result<(), PlatformError> {
        if self.failing_sends.lock().unwrap().contains(&channel_id) {
            Err(PlatformError::Forbidden)
        } else {
            Ok(())
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn create_message(&self) -> Id<MessageMarker> {
        let message_id = self.mint_message_id();
        self.live_messages.lock().unwrap().insert(message_id);
        message_id
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn send_message(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<Id<MessageMarker>, PlatformError> {
        self.check_send(channel_id)?;
        let message_id = self.create_message();
        self.record(Call::Send {
            channel_id,
            message_id,
            content: content.to_owned(),
        });
        Ok(message_id)
    }

    async fn send_with_components(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
        components: &[Component],
    ) -> Result<Id<MessageMarker>, PlatformError> {
        self.check_send(channel_id)?;
        let custom_ids = components
            .iter()
            .flat_map(|component| match component {
                Component::ActionRow(row) => row.components.clone(),
                other => vec![other.clone()],
            })
            .filter_map(|component| match component {
                Component::Button(button) => button.custom_id,
                _ => None,
            })
            .collect();

        self.record(Call::SendWithComponents {
            channel_id,
            content: content.to_owned(),
            custom_ids,
        });
        Ok(self.create_message())
    }

    async fn clear_components(
        &self,
        _channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<(), PlatformError> {
        self.record(Call::ClearComponents { message_id });
        if self.is_live(message_id) {
            Ok(())
        } else {
            Err(PlatformError::NotFound)
        }
    }

    async fn delete_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    ) -> Result<(), PlatformError> {
        if self.failing_deletes.lock().unwrap().contains(&channel_id) {
            return Err(PlatformError::Forbidden);
        }

        self.record(Call::Delete { message_id });
        if self.live_messages.lock().unwrap().remove(&message_id) {
            Ok(())
        } else {
            Err(PlatformError::NotFound)
        }
    }

    async fn add_reaction(
        &self,
        _channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reaction: &ReactionToken,
    ) -> Result<(), PlatformError> {
        self.record(Call::React {
            message_id,
            reaction: reaction.clone(),
        });
        Ok(())
    }

    async fn add_role(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), PlatformError> {
        self.record(Call::AddRole { user_id, role_id });
        let mut members = self.members.lock().unwrap();
        let roles = members.get_mut(&user_id).ok_or(PlatformError::NotFound)?;
        if !roles.contains(&role_id) {
            roles.push(role_id);
        }
        Ok(())
    }

    async fn remove_role(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), PlatformError> {
        self.record(Call::RemoveRole { user_id, role_id });
        let mut members = self.members.lock().unwrap();
        let roles = members.get_mut(&user_id).ok_or(PlatformError::NotFound)?;
        roles.retain(|role| *role != role_id);
        Ok(())
    }

    async fn member_roles(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Vec<Id<RoleMarker>>, PlatformError> {
        let failing = self
            .failing_role_polls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(PlatformError::Forbidden);
        }

        let roles = self
            .members
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(PlatformError::NotFound);

        let delay = *self.role_poll_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        roles
    }

    async fn guild_roles(
        &self,
        _guild_id: Id<GuildMarker>,
    ) -> Result<Vec<GuildRole>, PlatformError> {
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn respond_ephemeral(
        &self,
        _interaction: &InteractionRef,
        content: &str,
    ) -> Result<(), PlatformError> {
        self.record(Call::Ephemeral {
            content: content.to_owned(),
        });
        Ok(())
    }
}

pub fn sample_config() -> Configuration {
    Configuration {
        channel_id: VOUCH_CHANNEL,
        reaction: ReactionToken::Unicode("✅".to_owned()),
        trigger_phrase: "vouch for".to_owned(),
        mention_id: SELLER,
        warning_channel_id: WARNING_CHANNEL,
        role_id: PENDING_ROLE,
        notify_channel_id: NOTIFY_CHANNEL,
    }
}

pub fn test_timing() -> WatchTiming {
    WatchTiming {
        poll_interval: Duration::from_secs(60),
        deadline: Duration::from_secs(24 * 60 * 60),
    }
}

pub fn test_context(platform: &Arc<FakePlatform>) -> Context {
    let platform: Arc<dyn Platform> = platform.clone();
    Context::new(platform, State::new(), test_timing())
}

/// A context whose configuration is already active.
pub async fn configured_context(platform: &Arc<FakePlatform>) -> Context {
    let ctx = test_context(platform);
    ctx.state.config.replace(sample_config()).await;
    ctx
}

pub fn inbound(
    platform: &FakePlatform,
    channel_id: Id<ChannelMarker>,
    author_id: Id<UserMarker>,
    content: &str,
    attachment_count: usize,
) -> InboundMessage {
    InboundMessage {
        id: platform.mint_message_id(),
        channel_id,
        guild_id: Some(GUILD),
        author_id,
        author_is_bot: false,
        content: content.to_owned(),
        attachment_count,
    }
}

pub fn press(actor_id: Id<UserMarker>, custom_id: &str) -> ButtonPress {
    ButtonPress {
        interaction: InteractionRef {
            application_id: Id::new(900),
            id: Id::new(901),
            token: "interaction-token".to_owned(),
        },
        actor_id: Some(actor_id),
        custom_id: custom_id.to_owned(),
    }
}
