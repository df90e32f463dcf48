use clap::Parser;
use std::sync::Arc;
use tenderx_api::{ApiConfig, ApiState, RestApi};
use tenderx_core::VectorizerConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Similarity and recommendation service for tenders and proposals
#[derive(Parser, Debug)]
#[command(name = "tenderx")]
#[command(about = "Tender similarity and recommendation engine", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = tenderx_api::config::DEFAULT_PORT)]
    http_port: u16,

    /// Length of every document vector
    #[arg(long, default_value_t = tenderx_core::DEFAULT_VECTOR_DIM)]
    vector_dim: usize,

    /// Largest candidate pool accepted per request
    #[arg(long, default_value_t = tenderx_api::config::DEFAULT_MAX_POOL_SIZE)]
    max_pool_size: usize,

    /// Most vectors kept in the cache
    #[arg(long, default_value_t = tenderx_api::config::DEFAULT_CACHE_MAX_ENTRIES)]
    cache_max_entries: usize,

    /// Disable the content-hash vector cache
    #[arg(long)]
    no_cache: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting TenderX v{}", env!("CARGO_PKG_VERSION"));
    info!("Vector dimension: {}", args.vector_dim);
    info!("Max pool size: {}", args.max_pool_size);
    if args.no_cache {
        info!("Vector cache: disabled");
    } else {
        info!("Vector cache: up to {} entries", args.cache_max_entries);
    }

    let config = ApiConfig {
        host: args.host,
        port: args.http_port,
        max_pool_size: args.max_pool_size,
        cache_enabled: !args.no_cache,
        cache_max_entries: args.cache_max_entries,
        vectorizer: VectorizerConfig::with_dim(args.vector_dim),
        ..Default::default()
    };
    let state = Arc::new(ApiState::new(config)?);
    info!("Engine initialized");

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("TenderX started successfully");
    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
