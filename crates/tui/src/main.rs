mod app;
mod client;
mod config;
mod error;
mod local_state;
mod logging;
mod ui;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let launch = config::load()?;
    logging::init(&launch.config)?;
    tracing::info!(
        base_url = %launch.config.base_url,
        operation_id = ?launch.operation_id,
        "starting operation editor"
    );

    let mut app = app::App::new(launch)?;
    app.run().await?;
    Ok(())
}
