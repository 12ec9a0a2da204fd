use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{FlavorApi, HttpClient};
use crate::app::App;

mod api;
mod app;
mod cli;
mod config;
mod model;
mod submission;
mod theme;
mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting flavordesk");

    let args = cli::Args::parse();

    let mut config = config::load()?;
    args.apply(&mut config);

    let api = Arc::new(HttpClient::new(&config.api)?);
    let site = api
        .fetch_site(&args.site)
        .await
        .wrap_err_with(|| format!("Failed to load site {}", args.site))?;
    info!(site_id = %site.id, "Loaded site {}", site.name);

    let mut app = App::new(site, api, &config);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("flavordesk").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "flavordesk.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
