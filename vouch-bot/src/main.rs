use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use vouch_commands::{handle_interaction, handle_message};
use vouch_core::{Context, Settings, twilight::TwilightPlatform};
use vouch_state::State;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load the .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    let settings = Settings::from_env()?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(settings.token.clone()));
    let platform = Arc::new(TwilightPlatform::new(Arc::clone(&http)));
    let ctx = Context::new(platform, State::new(), settings.timing);

    // Declare which intents the bot has
    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), settings.token, intents);

    info!(
        poll_secs = settings.timing.poll_interval.as_secs(),
        deadline_secs = settings.timing.deadline.as_secs(),
        "vouch bot is connecting..."
    );

    // Events are handled one at a time; expiry watches run on their own tasks.
    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.name, "vouch bot is ready");
            }
            Event::MessageCreate(msg) => {
                if let Err(source) = handle_message(ctx.clone(), msg).await {
                    error!(?source, "message handler failed");
                }
            }
            Event::InteractionCreate(interaction) => {
                if let Err(source) = handle_interaction(ctx.clone(), interaction).await {
                    error!(?source, "interaction handler failed");
                }
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(()) // Return Success, shutdown cleanly
}
