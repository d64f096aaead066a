use actix_web::{web, App, HttpServer};
use clap::Parser;
use fitlog_core::{Config, UserStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Exercise tracking API server", long_about = None)]
struct Cli {
    /// Override data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override listen port
    #[arg(long)]
    port: Option<u16>,

    /// Load configuration from a specific file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    fitlog_core::logging::init();

    let cli = Cli::parse();

    // Configuration precedence: file < environment < CLI flags
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(to_io_error)?;
    config.apply_env_overrides();

    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // The store is opened once at startup and shared across workers
    let store = web::Data::new(UserStore::open(config.data.data_dir.clone()).map_err(to_io_error)?);

    tracing::info!(
        "Listening on {}:{} (data dir {:?})",
        config.server.host,
        config.server.port,
        config.data.data_dir
    );

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(fitlog_api::configure)
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await
}

fn to_io_error(err: fitlog_core::Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
