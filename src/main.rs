use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use pocket_snake::app::App;
use pocket_snake::game::GameConfig;

/// Terminal columns per grid cell; each cell is drawn as two characters
const CELL_COLUMNS: u16 = 2;
/// Rows taken by the score header, the footer and the board border
const CHROME_ROWS: u16 = 8;
const CHROME_COLUMNS: u16 = 4;

#[derive(Parser)]
#[command(name = "pocket_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Size the grid to the current terminal
    #[arg(long, conflicts_with_all = ["width", "height"])]
    fit_terminal: bool,

    /// Milliseconds between two moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if self.fit_terminal {
            let (columns, rows) =
                crossterm::terminal::size().context("Failed to read terminal size")?;
            let fitted = GameConfig::from_display(
                columns.saturating_sub(CHROME_COLUMNS),
                rows.saturating_sub(CHROME_ROWS),
                CELL_COLUMNS,
                1,
            );
            config = config.with_grid(fitted.grid_width, fitted.grid_height);
        } else if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.grid_width);
            let height = self.height.unwrap_or(config.grid_height);
            config = config.with_grid(width, height);
        }

        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    log::info!(
        "starting with a {}x{} grid, {} ms per tick",
        config.grid_width,
        config.grid_height,
        config.tick_interval_ms
    );

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}
