//! retag CLI - tag every repository matching a search topic
//!
//! Usage:
//!   retag --org acme                      - prompt for the search topic
//!   retag --org acme --topic deprecated   - non-interactive
//!
//! The token comes from --token or the GITHUB_TOKEN environment variable.
//! The run always exits 0 once started; per-repository failures show up in
//! the logs and the final summary.

use clap::Parser;
use console::style;
use dialoguer::Input;
use github::GithubClient;
use indicatif::{ProgressBar, ProgressStyle};
use shared::RetagConfig;
use std::sync::Arc;
use tagger::RunSummary;

#[derive(Parser)]
#[command(name = "retag")]
#[command(about = "Apply a topic to every repository in an organization matching a search topic")]
#[command(version)]
struct Cli {
    /// Organization to search
    #[arg(short, long)]
    org: String,

    /// Topic to search for (prompted interactively when omitted)
    #[arg(short, long)]
    topic: Option<String>,

    /// Topic to apply to each match
    #[arg(long, default_value = shared::DEFAULT_LEGACY_TOPIC)]
    legacy_topic: String,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Assumed total number of search results driving pagination
    #[arg(long, default_value_t = shared::DEFAULT_ESTIMATED_TOTAL)]
    estimated_total: usize,

    /// Maximum simultaneous page fetches
    #[arg(long, default_value_t = shared::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = shared::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> (RetagConfig, Option<String>) {
        let mut config = RetagConfig::new(self.token, self.org);
        config.legacy_topic = self.legacy_topic;
        config.estimated_total = self.estimated_total;
        config.concurrency = self.concurrency;
        config.timeout_secs = self.timeout_secs;
        (config, self.topic)
    }
}

fn print_summary(summary: &RunSummary, org: &str, search_topic: &str, legacy_topic: &str) {
    println!();
    println!(
        "{}",
        style(format!(
            "Repositories in \"{org}\" with topic \"{search_topic}\""
        ))
        .bold()
    );
    println!(
        "  pages fetched:    {} ({} failed)",
        summary.pages_fetched, summary.pages_failed
    );
    println!("  repos found:      {}", summary.repos_found);
    println!();
    println!("{}", style(format!("Applied topic \"{legacy_topic}\"")).bold());
    println!("  added:            {}", style(summary.added).green());
    println!("  already present:  {}", summary.already_present);
    if summary.failed() > 0 {
        println!(
            "  failed:           {} ({} read, {} write)",
            style(summary.failed()).red(),
            summary.fetch_failed,
            summary.put_failed
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let (config, topic) = cli.into_config();
    config.validate()?;

    let search_topic = match topic {
        Some(topic) => topic,
        None => Input::new()
            .with_prompt("Enter the topic name to search for")
            .interact_text()?,
    };
    let search_topic = search_topic.trim().to_string();

    let api = Arc::new(GithubClient::from_config(&config)?);

    println!(
        "Searching {} for repositories with topic \"{}\" ({} pages, {} workers)...",
        style(&config.org_name).bold(),
        search_topic,
        config.total_pages(),
        config.concurrency
    );

    let bar = ProgressBar::hidden();
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .expect("static progress template"),
    );

    let summary = tagger::run(api, &config, &search_topic, |index, total, repo, _update| {
        if index == 0 {
            bar.set_length(total as u64);
            bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        }
        bar.set_message(repo.full_name.clone());
        bar.inc(1);
    })
    .await;
    bar.finish_and_clear();

    print_summary(&summary, &config.org_name, &search_topic, &config.legacy_topic);

    // Individual failures are summary lines, never a nonzero exit
    Ok(())
}
