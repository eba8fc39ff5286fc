//! Per-grant expiry watch.
//!
//! A watch polls the grantee's live roles every `poll_interval`. It ends silently
//! once the role is gone, or escalates once `deadline` has elapsed with the role
//! still held. One watch at most runs per (user, role) pair; a re-grant while it
//! runs is adopted by the live watch, which restarts its deadline.

use tokio::{
    task::JoinHandle,
    time::{Instant, sleep},
};
use tracing::{debug, error, info, warn};
use twilight_model::id::{
    Id,
    marker::{GuildMarker, RoleMarker, UserMarker},
};
use vouch_core::{Context, PlatformError};
use vouch_state::watches::WatchClaim;

use crate::messages::escalation_notice;
use crate::vouch::escalation;

#[derive(Clone, Debug)]
pub struct RoleGrant {
    pub guild_id: Id<GuildMarker>,
    pub user_id: Id<UserMarker>,
    pub role_id: Id<RoleMarker>,
    pub role_name: String,
    pub granted_at: Instant,
}

impl RoleGrant {
    pub fn new(
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
        role_name: String,
    ) -> Self {
        Self {
            guild_id,
            user_id,
            role_id,
            role_name,
            granted_at: Instant::now(),
        }
    }
}

/// Terminal state of a watch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WatchOutcome {
    RoleLost,
    Escalated,
}

/// Spawn a watch for `grant` unless one is already live for the same pair.
pub fn start(ctx: &Context, grant: RoleGrant) -> Option<JoinHandle<WatchOutcome>> {
    let Some(claim) = ctx.state.watches.try_claim(grant.user_id, grant.role_id) else {
        debug!(
            user_id = grant.user_id.get(),
            role_id = grant.role_id.get(),
            "expiry watch already running"
        );
        return None;
    };

    info!(
        user_id = grant.user_id.get(),
        role_id = grant.role_id.get(),
        deadline_secs = ctx.timing.deadline.as_secs(),
        "expiry watch started"
    );

    Some(tokio::spawn(run(ctx.clone(), grant, claim)))
}

async fn run(ctx: Context, mut grant: RoleGrant, mut claim: WatchClaim) -> WatchOutcome {
    let timing = ctx.timing;

    loop {
        sleep(timing.poll_interval).await;

        let holds_role = match ctx
            .platform
            .member_roles(grant.guild_id, grant.user_id)
            .await
        {
            Ok(roles) => roles.contains(&grant.role_id),
            Err(PlatformError::NotFound) => false,
            Err(source) => {
                warn!(
                    ?source,
                    user_id = grant.user_id.get(),
                    "role poll failed, retrying next interval"
                );
                continue;
            }
        };

        // The role was granted again since the last poll; the deadline restarts.
        if claim.take_regrant() {
            adopt_regrant(&mut grant);
            continue;
        }

        if !holds_role {
            if !claim.try_release() {
                adopt_regrant(&mut grant);
                continue;
            }

            debug!(
                user_id = grant.user_id.get(),
                role_id = grant.role_id.get(),
                "role removed, watch ended"
            );
            return WatchOutcome::RoleLost;
        }

        if grant.granted_at.elapsed() >= timing.deadline {
            escalate(&ctx, &grant).await;
            return WatchOutcome::Escalated;
        }
    }
}

fn adopt_regrant(grant: &mut RoleGrant) {
    debug!(
        user_id = grant.user_id.get(),
        role_id = grant.role_id.get(),
        "role granted again, deadline restarted"
    );
    grant.granted_at = Instant::now();
}

async fn escalate(ctx: &Context, grant: &RoleGrant) {
    info!(
        user_id = grant.user_id.get(),
        role_id = grant.role_id.get(),
        "deadline passed with role held, escalating"
    );

    let Some(config) = ctx.state.config.active().await else {
        warn!("configuration inactive, cannot escalate");
        return;
    };

    let notice = escalation_notice(grant.user_id, &grant.role_name, ctx.timing.deadline);
    if let Err(source) = ctx
        .platform
        .send_message(config.notify_channel_id, &notice)
        .await
    {
        error!(?source, "failed to post escalation notice");
    }

    if let Err(source) = escalation::publish_prompt(ctx, &config, grant).await {
        error!(?source, "failed to publish revocation prompt");
    }
}
