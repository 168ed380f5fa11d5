use std::io;

use contact_relay::configuration::Settings;
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("contact_relay".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config().expect("Failed to load configuration");

    // Prepare and run the application
    let application = Application::build(config)?;
    tracing::info!(port = application.port(), "Contact relay is listening");
    application.run_until_stopped().await?;

    Ok(())
}
