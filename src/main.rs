use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedsite::config::Config;
use feedsite::render::Theme;
use feedsite::scheduler::Scheduler;
use feedsite::store::Store;

#[derive(Parser, Debug)]
#[command(author, version, about = "Static news page generator", long_about = None)]
struct Args {
    /// Rendering theme for the generated pages
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    theme: Theme,

    /// Path to the feed configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory the generated pages are written to
    #[arg(long, default_value = "public")]
    out_dir: PathBuf,

    /// Run a single cycle and exit instead of polling forever
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedsite=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // A good configuration is required before any polling may start.
    let config = Config::load(&args.config)?;
    info!("Loaded {} feeds from configuration", config.feeds.len());

    std::fs::create_dir_all(&args.out_dir)?;

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:feedsite.db?mode=rwc".to_string());
    let store = Store::new(&database_url).await?;
    store.initialize().await?;
    info!("Entry store initialized");

    let scheduler = Scheduler::new(store, args.out_dir, args.theme);

    if args.once {
        scheduler.run_cycle(&config).await;
        return Ok(());
    }

    if let Err(e) = scheduler.run(&args.config).await {
        error!("Scheduler halted: {}", e);
        return Err(e.into());
    }

    Ok(())
}
