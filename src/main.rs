use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;

use searchbar::client::{Coordinates, SearchContext};
use searchbar::config::{self, SearchBarConfig};
use searchbar::controller::{SearchBarController, SelectOutcome, SubmitHandle};
use searchbar::demo::{
    Command, CorpusSearchClient, FixedGeolocation, RecordingRouter, default_corpus,
    parse_command, render_panel,
};
use searchbar::near_me::NearMeDispatchPolicy;
use searchbar::notification::NotificationQueue;

/// Interactive search bar over an in-memory suggestion corpus
#[derive(Debug, Parser)]
#[command(name = "searchbar", version, about)]
struct Cli {
    /// JSON array of suggestions: [{"value": "...", "vertical_keys": ["..."]}]
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Config file (defaults to ~/.config/searchbar/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scope search to one vertical
    #[arg(long)]
    vertical: Option<String>,

    /// Simulated autocomplete latency
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Location reported for near-me queries, as "lat,lon"
    #[arg(long, value_parser = parse_location)]
    location: Option<Coordinates>,
}

fn parse_location(s: &str) -> std::result::Result<Coordinates, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| "expected \"lat,lon\"".to_string())?;
    let latitude = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let longitude = lon.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Coordinates {
        latitude,
        longitude,
        accuracy_m: None,
    })
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(run(cli))
}

fn load_config(cli: &Cli) -> Result<SearchBarConfig> {
    match &cli.config {
        Some(path) => config::read_config(path).wrap_err("Failed to load config"),
        None => {
            let result = config::load_config();
            if let Some(warning) = result.warning {
                eprintln!("{}", warning);
            }
            Ok(result.config)
        }
    }
}

fn load_client(cli: &Cli) -> Result<CorpusSearchClient> {
    let latency = Duration::from_millis(cli.latency_ms);
    match &cli.corpus {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read corpus {}", path.display()))?;
            Ok(CorpusSearchClient::from_json(&json, latency)?)
        }
        None => Ok(CorpusSearchClient::new(default_corpus(), latency)),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = Arc::new(load_client(&cli)?);
    let router = Arc::new(RecordingRouter::default());
    let notifications = Arc::new(NotificationQueue::new());

    let near_me = NearMeDispatchPolicy::new(
        client.clone(),
        Arc::new(FixedGeolocation::new(cli.location)),
        notifications.clone(),
        config.geolocation.clone(),
    );
    let context = match cli.vertical {
        Some(key) => SearchContext::Vertical(key),
        None => SearchContext::Universal,
    };
    let mut controller =
        SearchBarController::new(config, client, router.clone(), near_me).with_context(context);

    if let Some(placeholder) = controller.placeholder() {
        println!("[{}]", placeholder);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut submitted: Option<SubmitHandle> = None;

        match parse_command(&line) {
            Command::Quit => break,
            Command::Change(text) => controller.on_change(&text),
            Command::Focus => controller.on_focus(),
            Command::Close => controller.on_toggle(true),
            Command::Open => controller.on_toggle(false),
            Command::ClearRecent => {
                controller.set_recent_searches_enabled(false);
                controller.set_recent_searches_enabled(true);
            }
            Command::Highlight(index) => {
                controller.on_highlight(index);
            }
            Command::Submit => submitted = Some(controller.on_submit()),
            Command::Select(index) => match controller.on_select(index) {
                SelectOutcome::Dispatched(handle) => submitted = Some(handle),
                SelectOutcome::Navigated { .. } | SelectOutcome::Closed => {}
                SelectOutcome::Ignored => eprintln!("no row {}", index),
            },
            Command::Unknown(text) => eprintln!("unknown command: {}", text),
        }

        if let Some(handle) = submitted {
            match handle.outcome().await {
                Ok(outcome) => {
                    let location = outcome
                        .query
                        .location
                        .map(|c| format!(" @ {},{}", c.latitude, c.longitude))
                        .unwrap_or_default();
                    writeln!(stdout, "search: {}{}", outcome.query.text, location)?;
                }
                Err(e) => writeln!(stdout, "search failed: {}", e)?,
            }
        }
        for path in router.take() {
            writeln!(stdout, "navigate: {}", path)?;
        }
        for notification in notifications.take_all() {
            writeln!(stdout, "warning: {}", notification.message)?;
        }

        for update in controller.settle().await {
            if let searchbar::ControllerUpdate::Error(e) = update {
                writeln!(stdout, "suggestions unavailable: {}", e)?;
            }
        }
        write!(stdout, "{}", render_panel(&controller))?;
        stdout.flush()?;
    }

    Ok(())
}
