mod format;
mod menu;

use anyhow::Result;
use tripcast_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tripcast_core::init()?;

    let config = Config::from_env();
    for feature in config.missing_keys() {
        println!("note: {feature} is unavailable (no API key configured)");
    }

    let app = menu::App::bootstrap(config).await?;
    tracing::info!("Tripcast started");
    app.run().await
}
