use anyhow::Result;

use academy::App;
use academy_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_validated()?;

    // Deep link, e.g. the OAuth redirect target with tokens attached.
    let landing_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.frontend_url.clone());

    App::new(settings, landing_url).run().await?;

    Ok(())
}
