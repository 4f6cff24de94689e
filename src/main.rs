use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use yt_popular::api::YouTubeClient;
use yt_popular::collector::Collector;
use yt_popular::config::{load_env, Config, DEFAULT_OUTPUT};
use yt_popular::error::Result;
use yt_popular::output::{print_summary, write_results};

#[derive(Parser)]
#[command(name = "yt-popular")]
#[command(about = "List a YouTube channel's videos above a view-count threshold")]
#[command(version)]
struct Cli {
    /// Where to write the JSON results
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    load_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.is_quota_exhausted() {
            eprintln!("API key exhausted, try again later.");
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?.with_output_path(cli.output);

    eprintln!("Fetching videos for channel {}...", config.channel_id);

    let client = YouTubeClient::new(&config)?;
    let videos = Collector::new(client, &config).collect().await?;

    print_summary(&videos, config.min_views);

    write_results(&config.output_path, &videos)?;
    println!("Results written to {}", config.output_path.display());

    Ok(())
}
