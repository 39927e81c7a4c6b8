use anyhow::Result;

use fitlink::App;
use fitlink_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    if let Err(e) = settings.validate() {
        eprintln!("{}", e);
        eprintln!("Set FITBIT_CLIENT_ID and FITBIT_CLIENT_SECRET (or add them to fitlink.toml)");
        std::process::exit(1);
    }

    // Logging is initialized in App::run() so it never writes to the terminal
    App::new(settings).run().await?;

    Ok(())
}
