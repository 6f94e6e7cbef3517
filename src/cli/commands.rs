use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::error;

use crate::config::{
    BrowserConfig, DEFAULT_CDP_ENDPOINT, DEFAULT_POLL_INTERVAL_MS, DEFAULT_URL_MATCH,
    TrackerConfig,
};
use crate::log_store::{DEFAULT_LOG_FILENAME, read_log, summarize};
use crate::surface::chrome::ChromeSurface;
use crate::tracker::{JsonLinesHandler, PrintHandler, track};

#[derive(Parser)]
#[command(name = "chat-tracker")]
#[command(version = "0.1.0")]
#[command(about = "Track new messages of a web chat open in a running browser", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Attach to the browser and forward new chat messages
    Track(TrackArgs),
    /// Show statistics about the message log
    Stats {
        /// Message log to summarize
        #[arg(long, env = "CHAT_TRACKER_LOG_FILE", default_value = DEFAULT_LOG_FILENAME)]
        log_file: PathBuf,
    },
}

#[derive(Args)]
pub struct TrackArgs {
    /// Browser remote-debugging endpoint (http://host:port or ws:// URL)
    #[arg(long, env = "CHAT_TRACKER_CDP_ENDPOINT", default_value = DEFAULT_CDP_ENDPOINT)]
    pub cdp_endpoint: String,

    /// Substring identifying the chat tab's URL
    #[arg(long, env = "CHAT_TRACKER_URL_MATCH", default_value = DEFAULT_URL_MATCH)]
    pub url_match: String,

    /// Pause between polls, in milliseconds
    #[arg(long, env = "CHAT_TRACKER_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Append-only log of seen messages
    #[arg(long, env = "CHAT_TRACKER_LOG_FILE", default_value = DEFAULT_LOG_FILENAME)]
    pub log_file: PathBuf,

    /// Print new messages as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl TrackArgs {
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig { cdp_endpoint: self.cdp_endpoint.clone(), url_match: self.url_match.clone() }
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            poll_interval: Duration::from_millis(self.interval_ms),
            log_path: self.log_file.clone(),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Track(args)) => {
            run_tracker(args)?;
        }
        Some(Commands::Stats { log_file }) => {
            show_stats(log_file)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn run_tracker(args: &TrackArgs) -> Result<()> {
    let browser_config = args.browser_config();

    let Some(surface) = ChromeSurface::connect(&browser_config)? else {
        error!(url_match = %browser_config.url_match, "chat page not found");
        bail!("No open tab matches '{}'", browser_config.url_match);
    };

    if args.json {
        track(&surface, args.tracker_config(), JsonLinesHandler::new(io::stdout()))
    } else {
        track(&surface, args.tracker_config(), PrintHandler)
    }
}

fn show_stats(log_file: &Path) -> Result<()> {
    let messages = read_log(log_file)?;
    let stats = summarize(&messages);

    println!("Chat Message Log Statistics");
    println!("===========================");
    println!("Log file: {}", log_file.display());
    println!("Total messages: {}", stats.total);

    if let Some(first) = &stats.first {
        println!("First entry: {}", first.timestamp);
    }
    if let Some(last) = &stats.last {
        println!("Last entry: {}", last.timestamp);
    }

    if !stats.senders.is_empty() {
        println!();
        println!("Messages by sender:");
        for (sender, count) in &stats.senders {
            let sender = if sender.is_empty() { "(unknown)" } else { sender.as_str() };
            println!("  {}: {}", sender, count);
        }
    }

    Ok(())
}
