use std::path::PathBuf;

use clap::Parser;

use reviewwatch_core::AppId;
use reviewwatch_feed::FeedClient;
use reviewwatch_store::SeenStore;

mod notify;
mod watch;

#[derive(Debug, Parser)]
#[command(name = "reviewwatch")]
#[command(about = "Reports new App Store customer reviews for an app")]
struct Cli {
    /// Numeric App Store id of the app to watch
    #[arg(short = 'a', long)]
    appid: String,

    /// App name used in email subjects (defaults to the app id)
    #[arg(short = 'n', long)]
    appname: Option<String>,

    /// Send an email for each new review (requires --config)
    #[arg(short = 'e', long)]
    send_emails: bool,

    /// Path to the YAML email delivery configuration
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = reviewwatch_core::load_app_config()?;
    init_tracing(&config.log_level);

    // Resolve the email channel up front so a bad config fails the run
    // before any review is marked seen.
    let email = if cli.send_emails {
        let path = cli.config.as_deref().ok_or_else(|| {
            anyhow::anyhow!("--send-emails requires an email configuration file; pass one with --config")
        })?;
        Some(notify::email::EmailConfig::load(path)?)
    } else {
        None
    };

    let app_id = AppId::parse(&cli.appid)?;
    let client = FeedClient::with_base_url(
        config.feed_request_timeout_secs,
        &config.feed_user_agent,
        config.feed_max_retries,
        config.feed_retry_backoff_base_ms,
        &config.feed_base_url,
    )?;
    let store = SeenStore::open_for_app(&config.data_dir, &app_id).await?;

    let events = watch::find_new_reviews(
        &client,
        &store,
        &app_id,
        config.feed_max_concurrent_storefronts,
    )
    .await?;

    let app_name = cli.appname.as_deref().unwrap_or(app_id.as_str());
    for event in &events {
        notify::console::print_review(event);
        if let Some(email) = &email {
            notify::email::send_review(email, event, &app_id, app_name).await?;
        }
    }

    tracing::info!(app_id = %app_id, new_reviews = events.len(), "watch run complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
