use std::sync::Arc;

use anyhow::Context;
use discovery_core::DiscoveryParams;
use discovery_engine::{
    CurrentUser, DiscoveryViewModel, Environment, LogAnalytics, ReqwestApiClient,
    RonIntPreference,
};
use discovery_logging::{discovery_info, discovery_warn};

use crate::config::AppConfig;
use crate::render::{self, ScreenPrinter};

/// Loads the configured feed once and prints what the screen would show.
pub async fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let api = ReqwestApiClient::new(config.api_settings())
        .with_context(|| format!("invalid API base url {:?}", config.api_base_url))?;

    let env = Environment {
        api: Arc::new(api),
        current_user: Arc::new(CurrentUser::new(config.user.clone())),
        activity_sample_preference: Arc::new(RonIntPreference::new(
            config.preference_path.clone(),
        )),
        analytics: Arc::new(LogAnalytics),
    };

    let view_model = DiscoveryViewModel::new(env);
    let mut printer = ScreenPrinter::subscribe(view_model.outputs());

    discovery_info!(
        "Loading discover feed from {} sorted by {}",
        config.api_base_url,
        config.seed_sort.as_str()
    );
    view_model.select_params(DiscoveryParams::builder().sort(config.seed_sort).build());
    view_model.root_categories(config.root_categories.clone());

    if tokio::time::timeout(config.settle_timeout(), view_model.flush())
        .await
        .is_err()
    {
        discovery_warn!(
            "Feed did not settle within {} ms; printing partial state",
            config.settle_timeout_ms
        );
    }

    for line in printer.pending_lines() {
        println!("{line}");
    }
    if let Some(view) = view_model.view().await {
        println!("{}", render::summary_line(&view));
    }
    Ok(())
}
