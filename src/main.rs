use clap::{Parser, Subcommand};
use podcast_aggregator::{
    FetchConfig, PageRequest, PodcastAggregator, PodcastError, SearchParams, ShowConfig,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "podcast-aggregator")]
#[command(about = "Query Podcast 2.0 feeds: search episodes, fetch transcripts")]
struct Cli {
    /// JSON config file: an ordered array of {"name": ..., "url": ...} shows
    #[arg(long, env = "PODCAST_FEEDS")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List configured show names
    Shows,
    /// Search episodes; at least one filter must be given
    Search {
        /// Restrict to one show (default: all configured shows)
        #[arg(long)]
        show: Option<String>,
        /// Only episodes published on or after this date
        #[arg(long)]
        since: Option<String>,
        /// Only episodes published on or before this date
        #[arg(long)]
        before: Option<String>,
        /// Host name to filter by (repeatable)
        #[arg(long)]
        host: Vec<String>,
        /// Text to match in titles and descriptions
        #[arg(long)]
        text: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 5)]
        per_page: usize,
    },
    /// Show one episode by guid or episode number
    Episode { show: String, episode: String },
    /// Fetch an episode's transcript text
    Transcript { show: String, episode: String },
}

#[derive(Serialize)]
struct TranscriptResponse {
    transcript: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ShowConfig::from_json_file(&cli.config)?;
    info!("Serving {} configured shows", config.len());

    let aggregator = PodcastAggregator::new(config, FetchConfig::default());

    match cli.command {
        Command::Shows => print_json(&aggregator.list_shows())?,
        Command::Search {
            show,
            since,
            before,
            host,
            text,
            page,
            per_page,
        } => {
            let params = SearchParams {
                show_name: show,
                since_date: since,
                before_date: before,
                hosts: if host.is_empty() { None } else { Some(host) },
                text_search: text,
            };
            let window = PageRequest { page, per_page };
            render(aggregator.search_episodes(&params, window).await)?;
        }
        Command::Episode { show, episode } => {
            render(aggregator.get_episode(&show, &episode).await)?;
        }
        Command::Transcript { show, episode } => {
            render(
                aggregator
                    .get_transcript(&show, &episode)
                    .await
                    .map(|transcript| TranscriptResponse { transcript }),
            )?;
        }
    }

    Ok(())
}

/// Boundary rendering: successes and failures both come back as structured
/// JSON, never as a bare crash.
fn render<T: Serialize>(result: Result<T, PodcastError>) -> anyhow::Result<()> {
    match result {
        Ok(value) => print_json(&value),
        Err(e) => {
            print_json(&ErrorResponse {
                error: e.to_string(),
            })?;
            std::process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
