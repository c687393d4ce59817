//! Solve a directional maze described in JSON and print the moves.
//!
//! Run: cargo run --bin maze-solve -- --input puzzle.json

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use serde::Deserialize;

use maze_core::{Direction, DirectionSet, MazeGrid, Position};
use maze_paths::{Maze, PassabilityTable, PathFinder, STANDARD};

#[derive(Parser, Debug)]
#[command(name = "maze-solve")]
#[command(about = "Shortest move sequence through a directional maze", long_about = None)]
struct Args {
    /// Puzzle JSON path ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Custom passability table JSON: {"<code>": ["up", "left", ...]}
    #[arg(short, long)]
    table: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Check every cell code before searching
    #[arg(long)]
    strict: bool,

    /// Raise the log level (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One direction per line
    Text,
    /// A JSON array of direction names
    Json,
}

#[derive(Debug, Deserialize)]
struct Puzzle {
    grid: MazeGrid,
    start: (i32, i32),
    goal: (i32, i32),
}

/// Exit status when the goal cannot be reached.
const NO_PATH: u8 = 2;

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut s = String::new();
        io::stdin()
            .read_to_string(&mut s)
            .context("failed to read stdin")?;
        Ok(s)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read file: {path}"))
    }
}

fn parse_puzzle(json: &str) -> Result<Puzzle> {
    serde_json::from_str(json).context("failed to parse puzzle JSON")
}

fn parse_table(json: &str) -> Result<PassabilityTable> {
    let raw: BTreeMap<u32, Vec<Direction>> =
        serde_json::from_str(json).context("failed to parse table JSON")?;
    Ok(PassabilityTable::from_entries(
        raw.into_iter()
            .map(|(code, dirs)| (code, dirs.into_iter().collect::<DirectionSet>())),
    ))
}

fn render(moves: &[Direction], format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => moves.iter().map(|d| format!("{d}\n")).collect(),
        Format::Json => {
            let mut s = serde_json::to_string(moves).context("failed to encode moves")?;
            s.push('\n');
            s
        }
    })
}

/// Solve `puzzle` and return the rendered moves, or `None` when there is no
/// path.
fn solve(
    puzzle: &Puzzle,
    table: &PassabilityTable,
    strict: bool,
    format: Format,
) -> Result<Option<String>> {
    if strict {
        table
            .validate(&puzzle.grid)
            .context("maze contains undefined cell codes")?;
    }
    let start = Position::from(puzzle.start);
    let goal = Position::from(puzzle.goal);
    let maze = Maze::new(&puzzle.grid, table);
    let mut finder = PathFinder::new(puzzle.grid.bounds());
    let found = finder
        .find_path(&maze, start, goal)
        .with_context(|| format!("search from {start} to {goal} failed"))?;
    log::info!(
        "{}x{} maze, {} positions expanded",
        puzzle.grid.rows(),
        puzzle.grid.cols(),
        finder.expanded()
    );
    found.map(|moves| render(&moves, format)).transpose()
}

fn run(args: &Args) -> Result<ExitCode> {
    let table = match &args.table {
        Some(path) => parse_table(&read_source(path)?)?,
        None => STANDARD.clone(),
    };
    log::debug!("passability table with {} codes", table.len());

    let puzzle = parse_puzzle(&read_source(&args.input)?)?;
    match solve(&puzzle, &table, args.strict, args.format)? {
        Some(out) => {
            print!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("no path");
            Ok(ExitCode::from(NO_PATH))
        }
    }
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(level(args.verbose))
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
