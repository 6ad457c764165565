use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use podcasts::app::{self, App};
use podcasts::config::{AppConfig, Cli};
use podcasts::debounce::ClickDebouncer;
use podcasts::logging::setup_logger;
use podcasts::podcast_repository::{
    FakeRepository, HttpPodcastRepository, PodcastRepository, sample_catalog,
};
use podcasts::view_model::PodcastListViewModel;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::try_from(Cli::parse())?;
    setup_logger(&config.log_file, config.log_level)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    let repository: Arc<dyn PodcastRepository> = if config.offline {
        info!("Starting offline with the sample catalog");
        Arc::new(FakeRepository::with_podcasts(sample_catalog()))
    } else {
        let repository =
            HttpPodcastRepository::new(config.catalog_url.as_str(), config.fetch_timeout)
                .context("failed to create HTTP client")?;
        info!("Starting with catalog {}", repository.catalog_url());
        Arc::new(repository)
    };

    let view_model = PodcastListViewModel::new(repository, config.fetch_timeout);
    let app = App::new(view_model, ClickDebouncer::new(config.debounce_interval));

    app::start_ui(app)
}
