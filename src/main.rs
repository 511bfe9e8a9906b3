use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fen_board::chess::placement::{BoardGrid, MalformedFen, STARTING_FEN};
use fen_board::render::{render, HtmlBoard, TextBoard, DEFAULT_ASSET_DIR};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Renders a chess position given in Forsyth-Edwards Notation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Position to render. Only the piece placement is used, the rest of FEN
    /// is ignored. Defaults to the starting position.
    fen: Vec<String>,
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,
    /// Directory with piece images used by the HTML output.
    #[arg(long, default_value = DEFAULT_ASSET_DIR)]
    assets: String,
    /// Print debug logs to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Checkered grid of `<div>` cells with piece images.
    Html,
    /// Plain diagram.
    Text,
    /// Canonical piece placement.
    Fen,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn draw(grid: &BoardGrid, config: &Config) -> anyhow::Result<String> {
    Ok(match config.format {
        Format::Html => {
            let mut board = HtmlBoard::with_asset_dir(&config.assets);
            render(grid, &mut board)?;
            board.to_string()
        },
        Format::Text => {
            let mut board = TextBoard::new();
            render(grid, &mut board)?;
            board.to_string()
        },
        Format::Fen => grid.to_string(),
    })
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(config.verbose);
    debug!("fen-board {}", fen_board::version());

    let fen = if config.fen.is_empty() {
        STARTING_FEN.to_string()
    } else {
        config.fen.join(" ")
    };
    let parsed: Result<BoardGrid, MalformedFen> = BoardGrid::try_from(fen.as_str());
    // Malformed input still gets a board: an empty one.
    let grid = match parsed {
        Ok(grid) => grid,
        Err(e) => {
            error!("{e}, rendering an empty board instead");
            BoardGrid::empty()
        },
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", draw(&grid, &config)?).context("writing the board")?;
    if let Err(e) = parsed {
        return Err(e).with_context(|| format!("can not render '{fen}'"));
    }
    Ok(())
}
