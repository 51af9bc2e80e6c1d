use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planner::config::Config;
use planner::mail::{HttpMailer, LogMailer, Mailer};
use planner::{api, db};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Trip-planning backend with invite and confirmation emails")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for the HTTP API (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "planner=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_env();

    let port = match cli.command {
        Some(Commands::Serve { port }) => port.unwrap_or(config.port),
        None => config.port,
    };

    serve(port, config).await
}

async fn serve(port: u16, config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting planner server on port {}", port);

    let db = match &config.database_path {
        Some(path) => db::Database::open(path.clone())?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let mailer: Arc<dyn Mailer> = match config.mail.api_url.clone() {
        Some(url) => Arc::new(HttpMailer::new(url, config.mail.api_key.clone())),
        None => {
            tracing::warn!("MAIL_API_URL not set, confirmation emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let state = api::AppState::new(db, mailer, config);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("planner server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
