use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use exif_fetch::config;
use exif_fetch::fetch::Fetcher;
use exif_fetch::pipeline;
use exif_fetch::render::{self, RenderOptions};

#[derive(Parser, Debug)]
#[command(
    name = "exif-fetch",
    version,
    about = "Download an image and print its EXIF metadata grouped by category"
)]
struct Cli {
    /// Image URL (prompted for when omitted)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output tags as JSON
    #[arg(long)]
    json: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    // Load config
    let mut config = config::Config::load(cli.config.as_deref())?;

    // Override from CLI flags
    if let Some(secs) = cli.timeout {
        config.fetch.timeout_secs = secs;
    }
    if cli.json {
        config.output.json = true;
    }
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal() {
        config.output.color = false;
    }

    let url = match cli.url {
        Some(url) => url,
        None => prompt_url()?,
    };

    let fetcher = Fetcher::new(&config.fetch)?;
    let inspection = pipeline::inspect_url(&fetcher, &url).await?;

    if config.output.json {
        let json = render::render_json(&inspection.record).context("Failed to serialize tags")?;
        println!("{json}");
        return Ok(());
    }

    let options = RenderOptions {
        color: config.output.color,
        show_unknown: config.output.show_unknown,
    };
    print!("{}", render::render_text(&inspection.record, &options));

    Ok(())
}

/// Ask for the URL on stdin.
fn prompt_url() -> Result<String> {
    print!("Image URL (e.g. www.example.com/image.png): ");
    std::io::stdout().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read URL from stdin")?;
    Ok(line.trim().to_string())
}
