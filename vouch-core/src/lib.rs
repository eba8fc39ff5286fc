use std::sync::Arc;

pub mod platform;
pub mod settings;
pub mod twilight;

pub use platform::{GuildRole, InteractionRef, Platform, PlatformError};
pub use settings::{Settings, WatchTiming};

use vouch_state::State;

/// Shared application context passed into command handlers and background watches.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub platform: Arc<dyn Platform>,
    pub state: State,
    pub timing: WatchTiming,
}

impl Context {
    /// Create a new application context.
    pub fn new(platform: Arc<dyn Platform>, state: State, timing: WatchTiming) -> Self {
        Self {
            platform,
            state,
            timing,
        }
    }
}
