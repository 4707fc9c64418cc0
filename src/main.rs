//! cheatdeck - Entry Point

use cheatdeck::analytics::Analytics;
use cheatdeck::config::ResolvedConfig;
use cheatdeck::model::{AppError, CardId};
use cheatdeck::parser::{bundled_deck, load_deck};
use cheatdeck::state::{hydrate_from_location, AppState, Location};
use cheatdeck::view::{ColorConfig, RunOptions};
use cheatdeck::view_state::columns::ColumnPolicy;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// cheatdeck - browse a deck of cross-linked reference cards
#[derive(Parser, Debug)]
#[command(name = "cheatdeck")]
#[command(version)]
#[command(about = "TUI reference browser for a curated deck of cross-linked topic cards")]
pub struct Args {
    /// Deck TOML file (the bundled deck is used if not provided)
    #[arg(long)]
    pub deck: Option<PathBuf>,

    /// Open this card on startup
    #[arg(short, long, value_parser = parse_card_id)]
    pub card: Option<CardId>,

    /// Start from a shared location such as "/?card=rag"
    #[arg(long)]
    pub location: Option<String>,

    /// How cards are distributed across grid columns
    #[arg(long, value_parser = ["round-robin", "shortest-first"])]
    pub policy: Option<String>,

    /// Do not record analytics events
    #[arg(long)]
    pub no_analytics: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_card_id(raw: &str) -> Result<CardId, String> {
    CardId::new(raw).map_err(|e| e.to_string())
}

impl Args {
    fn policy_override(&self) -> Option<ColumnPolicy> {
        // clap has already restricted the value to known names
        self.policy.as_deref().and_then(|name| name.parse().ok())
    }

    /// Location to hydrate from: `--location`, then `--card` on top of it.
    fn initial_location(&self) -> Location {
        let mut location = self
            .location
            .as_deref()
            .map(Location::parse)
            .unwrap_or_default();
        if let Some(card) = &self.card {
            location.replace_card_param(Some(card));
        }
        location
    }
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = cheatdeck::config::load_config_with_precedence(args.config.clone())?;
    let merged = cheatdeck::config::merge_config(config_file)?;
    let with_env = cheatdeck::config::apply_env_overrides(merged);
    Ok(cheatdeck::config::apply_cli_overrides(
        with_env,
        args.deck.clone(),
        args.policy_override(),
        args.no_analytics,
    ))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    cheatdeck::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let deck = match &config.deck {
        Some(path) => load_deck(path)?,
        None => bundled_deck()?,
    };
    info!(title = deck.title(), cards = deck.len(), "Deck loaded");

    let analytics = Analytics::from_config(&config);
    let mut state = AppState::new(deck, args.initial_location(), analytics, config.column_policy);
    hydrate_from_location(&mut state);

    let options = RunOptions {
        colors: ColorConfig::from_env_and_args(args.no_color),
        cell_width: config.cell_width,
    };
    cheatdeck::view::run(state, options)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    // This ensures consistent color handling throughout the application
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    run(args)?;
    Ok(())
}
