use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitlink_auth::{AuthContext, AuthEvent, Settings, TokenStore};

/// Link a Fitbit account without the terminal UI: start the callback
/// listener, open the browser and wait for the redirect.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();

    let settings = Settings::new()?;
    settings.validate()?;
    tracing::info!("Configuration loaded successfully");

    let token_store = TokenStore::from_settings(&settings)?;
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut context = AuthContext::new(settings, token_store)?.with_notifier(events_tx);

    context.start().await?;

    let url = context.begin_authorization()?;
    println!("Authorize fitlink in your browser. If it did not open, visit:");
    println!("{}\n", url);
    println!("Waiting for authorization (Ctrl+C to cancel)...");

    let outcome = tokio::select! {
        event = events_rx.recv() => event,
        _ = tokio::signal::ctrl_c() => None,
    };

    context.stop().await?;

    match outcome {
        Some(AuthEvent::AuthorizationCompleted { obtained_at }) => {
            println!(
                "✓ Fitbit connected at {}. Tokens saved to {}",
                obtained_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
                context.token_store().path().display()
            );
            Ok(())
        }
        Some(AuthEvent::AuthorizationFailed { error }) => bail!("Authorization failed: {}", error),
        None => {
            println!("Cancelled");
            Ok(())
        }
    }
}
