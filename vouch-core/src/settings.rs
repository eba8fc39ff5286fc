use std::{env, time::Duration};

use anyhow::Context as _;

const DEFAULT_POLL_SECS: u64 = 60;
const DEFAULT_DEADLINE_SECS: u64 = 24 * 60 * 60;

/// How often an expiry watch polls role membership, and how long a grant may live.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WatchTiming {
    pub poll_interval: Duration,
    pub deadline: Duration,
}

impl Default for WatchTiming {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
        }
    }
}

/// Process settings read from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
    pub token: String,
    pub timing: WatchTiming,
}

impl Settings {
    /// Read `DISCORD_TOKEN`, `VOUCH_POLL_SECS` and `VOUCH_DEADLINE_SECS`.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let timing = WatchTiming {
            poll_interval: Duration::from_secs(secs_var("VOUCH_POLL_SECS", DEFAULT_POLL_SECS)?),
            deadline: Duration::from_secs(secs_var("VOUCH_DEADLINE_SECS", DEFAULT_DEADLINE_SECS)?),
        };

        Ok(Self { token, timing })
    }
}

fn secs_var(name: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(name) {
        Ok(raw) => parse_secs(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_secs(name: &str, raw: &str) -> anyhow::Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{name} must be a whole number of seconds, got {raw:?}"))?;
    anyhow::ensure!(secs > 0, "{name} must be greater than zero");

    Ok(secs)
}
