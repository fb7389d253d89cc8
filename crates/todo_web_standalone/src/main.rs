use anyhow::Context;
use clap::Parser;
use todo_web::config::{
    load_session_config, ServerConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_WORKER_COUNT,
};
use todo_web::WebService;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "todo-web")]
#[command(about = "Session-backed to-do list manager")]
struct Cli {
    #[arg(long, env = "APP_HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, env = "APP_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[arg(long, env = "APP_WORKERS", default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Emit logs as JSON lines
    #[arg(long, env = "APP_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().with_target(true).json())
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_line_number(true)
                    .with_file(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    tracing::info!("Starting standalone todo web service...");

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        workers: cli.workers,
        session: load_session_config(),
    };
    tracing::debug!(?config, "Resolved configuration");

    let mut service = WebService::new(config);
    service.start().await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutdown requested");
    service.stop().await
}
