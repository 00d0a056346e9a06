//! Moyo -- estimate territory for a Go position.
//!
//! Reads a position, runs the playout estimator and prints the ownership of
//! every point.
//!
//! Usage:
//!   moyo [OPTIONS] < position.txt
//!   moyo --size 9 --first ccdd --second eeff [OPTIONS]
//!
//! Without `--first`/`--second` the position is read from stdin as a text
//! diagram (`.` empty, `X` first player, `O` second player).
//!
//! Options:
//!   --trials N       Number of playouts (default: 1000)
//!   --tolerance T    Classification tolerance in (0, 1] (default: 0.4)
//!   --to-move P      Side to move: first|second (default: first)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --threads N      Worker threads, 0 for all cores (default: 0)
//!   --max-moves N    Playout step bound per board point (default: 3)
//!   --size N         Square board size for coordinate input
//!   --width W        Board width for coordinate input
//!   --height H       Board height for coordinate input
//!   --first LIST     First-player stones as SGF coordinates
//!   --second LIST    Second-player stones as SGF coordinates
//!   --json           Print a JSON report instead of a diagram
//!   --quiet          Suppress summary output

use std::env;
use std::io::{self, Read, Write};
use std::process;
use std::time::Instant;

use env_logger::Env;
use serde::Serialize;

use moyo::board::{Board, Player};
use moyo::error::EstimateError;
use moyo::estimate::{estimate, EstimateConfig};
use moyo::ownership::{OwnershipCounts, OwnershipMap};
use moyo::protocol::coords::{format_coords, place_stones};
use moyo::protocol::diagram::{format_ownership, parse_diagram};

/// Parsed command-line options.
struct Options {
    config: EstimateConfig,
    to_move: Player,
    width: Option<usize>,
    height: Option<usize>,
    first: Option<String>,
    second: Option<String>,
    json: bool,
    quiet: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            config: EstimateConfig::default(),
            to_move: Player::First,
            width: None,
            height: None,
            first: None,
            second: None,
            json: false,
            quiet: false,
        }
    }
}

/// JSON report written with `--json`.
#[derive(Serialize)]
struct Report<'a> {
    to_move: Player,
    trials: usize,
    tolerance: f32,
    estimate: &'a OwnershipMap,
    counts: OwnershipCounts,
    dead_stones: String,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(Some(opts)) => opts,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(msg) = run(&opts) {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

fn run(opts: &Options) -> Result<(), String> {
    let board = read_position(opts)?;

    let start = Instant::now();
    let map = estimate(&board, opts.to_move, &opts.config).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    let counts = map.counts();
    let dead = map.dead_stones(&board).map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opts.json {
        let report = Report {
            to_move: opts.to_move,
            trials: opts.config.trials,
            tolerance: opts.config.tolerance,
            estimate: &map,
            counts,
            dead_stones: format_coords(&dead).map_err(|e| EstimateError::from(e).to_string())?,
        };
        let json = serde_json::to_string(&report).map_err(|e| e.to_string())?;
        writeln!(out, "{}", json).map_err(|e| e.to_string())?;
    } else {
        write!(out, "{}", format_ownership(&map)).map_err(|e| e.to_string())?;
    }
    out.flush().map_err(|e| e.to_string())?;

    if !opts.quiet {
        eprintln!(
            "{}x{} board, {} trials in {:.2}s",
            board.width(),
            board.height(),
            opts.config.trials,
            elapsed.as_secs_f64()
        );
        eprintln!(
            "First: {}  Second: {}  Neutral: {}  Undetermined: {}  Dead stones: {}",
            counts.first,
            counts.second,
            counts.neutral,
            counts.undetermined,
            dead.len()
        );
    }
    Ok(())
}

/// Builds the board from coordinate options, or from a stdin diagram.
fn read_position(opts: &Options) -> Result<Board, String> {
    if opts.first.is_none() && opts.second.is_none() && opts.width.is_none() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return parse_diagram(&text).map_err(|e| EstimateError::from(e).to_string());
    }

    let width = opts.width.ok_or("--size or --width is required with coordinates")?;
    let height = opts.height.unwrap_or(width);
    let mut board = Board::new(width, height).map_err(|e| e.to_string())?;
    if let Some(list) = &opts.first {
        place_stones(&mut board, list, Player::First).map_err(|e| e.to_string())?;
    }
    if let Some(list) = &opts.second {
        place_stones(&mut board, list, Player::Second).map_err(|e| e.to_string())?;
    }
    Ok(board)
}

/// Parses arguments. Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--json" => opts.json = true,
            "--quiet" => opts.quiet = true,
            "--help" | "-h" => return Ok(None),
            _ => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("missing value for {}", flag))?;
                i += 1;
                match flag {
                    "--trials" => opts.config.trials = parse_value(flag, value)?,
                    "--tolerance" => opts.config.tolerance = parse_value(flag, value)?,
                    "--seed" => opts.config.playout.seed = parse_value(flag, value)?,
                    "--threads" => opts.config.playout.threads = parse_value(flag, value)?,
                    "--max-moves" => {
                        opts.config.playout.max_moves_per_point = parse_value(flag, value)?
                    }
                    "--to-move" => {
                        opts.to_move = Player::from_name(value)
                            .ok_or_else(|| format!("invalid --to-move value: {}", value))?
                    }
                    "--size" => {
                        let size = parse_value(flag, value)?;
                        opts.width = Some(size);
                        opts.height = Some(size);
                    }
                    "--width" => opts.width = Some(parse_value(flag, value)?),
                    "--height" => opts.height = Some(parse_value(flag, value)?),
                    "--first" => opts.first = Some(value.clone()),
                    "--second" => opts.second = Some(value.clone()),
                    other => return Err(format!("Unknown argument: {}", other)),
                }
            }
        }
        i += 1;
    }
    Ok(Some(opts))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {} value: {}", flag, value))
}

fn print_usage() {
    eprintln!("Usage: moyo [OPTIONS] < position.txt");
    eprintln!("       moyo --size N [--first LIST] [--second LIST] [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --trials N       Number of playouts (default: 1000)");
    eprintln!("  --tolerance T    Classification tolerance in (0, 1] (default: 0.4)");
    eprintln!("  --to-move P      Side to move: first|second (default: first)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --threads N      Worker threads, 0 for all cores (default: 0)");
    eprintln!("  --max-moves N    Playout step bound per board point (default: 3)");
    eprintln!("  --size N         Square board size for coordinate input");
    eprintln!("  --width W        Board width for coordinate input");
    eprintln!("  --height H       Board height for coordinate input");
    eprintln!("  --first LIST     First-player stones as SGF coordinates");
    eprintln!("  --second LIST    Second-player stones as SGF coordinates");
    eprintln!("  --json           Print a JSON report instead of a diagram");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
