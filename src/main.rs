use anyhow::Result;
use restwatch::commands::Cli;
use restwatch::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "restwatch=debug,info".into()))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Cli::menu().await
}
