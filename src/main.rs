//! Gamedata - command line harness
//!
//! Loads the sales dataset, applies a drill-down and prints the chart data as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use gamedata::app::{App, AppError};
use gamedata::charts::ImageLookup;
use gamedata::config::ConfigLoader;
use gamedata::data::DataSource;

#[derive(Parser)]
#[command(name = "gamedata")]
#[command(about = "Video game sales breakdowns by genre and platform")]
#[command(version)]
struct Cli {
    /// Dataset path or http(s) URL; defaults to the configured location
    #[arg(long)]
    data: Option<String>,

    /// JSON config file (defaults to ./gamedata.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drill into a release year
    #[arg(long)]
    year: Option<i32>,

    /// Drill into a publisher within --year
    #[arg(long, requires = "year")]
    publisher: Option<String>,

    /// Resolve display images for a game
    #[arg(long)]
    game: Option<String>,

    /// Seed for fallback image selection
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<AppError>() {
                Some(AppError::Load(_)) => ExitCode::from(2),
                _ => ExitCode::from(1),
            }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConfigLoader::resolve(cli.config.as_deref()).context("loading configuration")?;
    let source = cli
        .data
        .as_deref()
        .map(DataSource::parse)
        .unwrap_or_else(|| config.dataset_source());

    let lookup = cli
        .seed
        .map(ImageLookup::seeded)
        .unwrap_or_else(ImageLookup::from_entropy);
    let mut app = App::with_lookup(&config, lookup);

    app.start_load(source);
    let report = app.wait_for_load()?;

    if let Some(year) = cli.year {
        app.state_mut().drill_into_year(year).map_err(AppError::from)?;
    }
    if let Some(publisher) = cli.publisher {
        app.state_mut()
            .drill_into_publisher(publisher)
            .map_err(AppError::from)?;
    }

    let images = cli.game.as_deref().map(|game| {
        let (comment, wordcloud) = app.select_game(game);
        json!({ "game": game, "comment": comment, "wordcloud": wordcloud })
    });

    let state = app.state();
    let output = json!({
        "context": state.context(),
        "report": report,
        "genre": state.genre_data(),
        "platform": state.platform_data(),
        "images": images,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
