use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use rackline::lexicon::Lexicon;
use rackline::query::{Crossword, Query, Rack, WordSpec};
use rackline::search;

/// Scrabble line-query tool
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH")),
    about,
    long_about = None
)]
struct Cli {
    /// Path to the word list file (one word per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/wordlist.txt")
    )]
    word_list: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find every legal placement of rack tiles along a line of the board
    Query {
        /// Letter pool, e.g. "detoau*" ('*' is a blank, "3e" is three e tiles)
        pool: String,

        /// Word spec, e.g. "/.!A./" ('/' anchors, '.' open, '#' DL, '!' TL,
        /// 'A-Z' a tile on the board, 'a-z' an open cell demanding that letter)
        spec: String,

        /// One crossword per open cell, e.g. ". ca.s .loft" (prefix.suffix);
        /// omit entirely for no crossing constraints
        crosswords: Vec<String>,

        /// Limit the output to the top NUM results
        #[arg(short = 'n', long, value_name = "NUM")]
        num_results: Option<usize>,
    },
}

/// Initialize logging.
///
/// Defaults to warnings only; `--debug` raises the filter to `Debug`, and
/// an explicit `RUST_LOG` overrides both.
fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
}

/// Entry point of the rackline CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    if let Err(e) = try_main() {
        // Print the error message to stderr
        eprintln!("Error: {e}");
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the rackline CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap and build the typed query.
/// 2. Load the word list from disk into the lexicon.
/// 3. Run the placement search.
/// 4. Print each ranked result on stdout.
/// 5. Print performance metrics (timings, counts) on stderr.
///
/// Returns `Ok(())` on success or an error (e.g., invalid pool, missing
/// word list file) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    init_logger(cli.debug);

    let Command::Query {
        pool,
        spec,
        crosswords,
        num_results,
    } = cli.command;

    // 1. Build the typed query before touching the filesystem, so bad input
    //    fails fast
    let rack: Rack = pool.parse()?;
    let spec: WordSpec = spec.parse()?;
    let crosswords: Vec<Crossword> = crosswords
        .iter()
        .map(|s| s.parse::<Crossword>())
        .collect::<Result<_, _>>()?;
    let query = Query::new(rack, spec, crosswords)?;

    // 2. Load the word list from disk
    let t_load = Instant::now();
    let lexicon = Lexicon::load_from_path(&cli.word_list)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // 3. Run the placement search
    let t_solve = Instant::now();
    let results = search::run_query(&lexicon, &query, num_results);
    let solve_secs = t_solve.elapsed().as_secs_f64();

    // 4. Print each result on stdout
    for hit in &results.hits {
        println!("{hit}");
    }

    let extra_results = results.total - results.hits.len();
    if extra_results > 0 {
        println!("({extra_results} more result(s)...)");
    }

    // 5. Print diagnostics (word count, timings, number of results) to stderr
    eprintln!(
        "Loaded {} words in {:.3}s; searched in {:.3}s ({} placement(s)).",
        lexicon.len(),
        load_secs,
        solve_secs,
        results.total
    );

    Ok(())
}
