//! Process-local moderation state.
//!
//! Nothing here survives a restart; every store is rebuilt empty on boot.

pub mod config;
pub mod prompts;
pub mod sticky;
pub mod warnings;
pub mod watches;

use config::ConfigStore;
use prompts::PromptRegistry;
use sticky::StickyStore;
use warnings::WarningLog;
use watches::WatchRegistry;

/// Shared state handle passed across crates.
///
/// Cheap to clone; every store is reference-counted internally.
#[derive(Clone, Default)]
pub struct State {
    pub config: ConfigStore,
    pub stickies: StickyStore,
    pub watches: WatchRegistry,
    pub prompts: PromptRegistry,
    pub warnings: WarningLog,
}

impl State {
    /// Create an empty state with an inactive configuration.
    pub fn new() -> Self {
        Self::default()
    }
}
