mod app;
mod config;
mod logging;
mod render;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let path = config::config_path();
    let config = config::load_config(&path)?;
    logging::initialize(config.log_destination);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(app::run_app(config))
}
