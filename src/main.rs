use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use claimdesk::auth::TokenStore;
use claimdesk::backend::http::HttpBackend;
use claimdesk::config::Config;
use claimdesk::constants::API_URL_ENV;
use claimdesk::logger::{self, Logger};
use claimdesk::routes::Route;
use claimdesk::ui::{self, core::AppContext};

#[derive(Parser, Debug)]
#[command(name = "claimdesk", version, about = "Terminal dashboard for an insurance claims backend")]
struct Cli {
    /// Configuration file to use instead of the default lookup
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Base URL of the claims API
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Route to open, e.g. "/claims" or "/claims/42"
    #[arg(long, short)]
    route: Option<String>,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    generate_config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.generate_config {
        let path = if path.is_empty() {
            Config::get_default_config_path()?
        } else {
            PathBuf::from(path)
        };
        return Config::generate_default_config(path);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url.filter(|url| !url.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
        config.validate()?;
    }

    let log_buffer = Logger::new();
    logger::init(&log_buffer, &config.logging)?;

    let tokens = match TokenStore::default_path().and_then(TokenStore::persistent) {
        Ok(tokens) => tokens,
        Err(e) => {
            log::warn!("Token will not persist across runs: {e:#}");
            TokenStore::in_memory()
        }
    };

    let backend = HttpBackend::new(&config.api.base_url, config.api.timeout(), tokens.clone())
        .context("Failed to create HTTP client")?;
    log::info!("Using claims API at {}", config.api.base_url);

    let start_route = Route::parse(cli.route.as_deref().unwrap_or(&config.ui.start_route));
    let ctx = AppContext::new(Arc::new(backend), tokens, config, log_buffer);

    ui::run_app(ctx, start_route).await
}
