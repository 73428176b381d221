mod app;
mod board;
mod book;
mod config;
mod constants;
mod error;
mod walker;
mod zobrist;

use crate::app::OutputFormat;
use crate::book::ChainOrder;
use crate::config::BuildConfig;
use crate::walker::openings::OPENING_LINES;
use crate::zobrist::PrngVariant;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// Compile opening books for the 6502 engine.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay opening lines written in short algebraic notation
    Lines {
        /// One line per row; defaults to the built-in opening list
        #[arg(long)]
        lines: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Walk a Polyglot book breadth-first from the start position
    Polyglot {
        /// Polyglot .bin file
        book: PathBuf,

        #[arg(long)]
        max_ply: Option<u32>,

        #[arg(long)]
        max_moves_per_position: Option<usize>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Output file; `.asm`/`.s` selects assembler source
    output: PathBuf,

    /// Hash table slots
    #[arg(long)]
    table_size: Option<usize>,

    #[arg(long)]
    max_entries: Option<usize>,

    /// Bytes reserved for the book on the target
    #[arg(long)]
    budget: Option<usize>,

    #[arg(long, value_enum)]
    prng: Option<PrngVariant>,

    #[arg(long, value_enum)]
    chain_order: Option<ChainOrder>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON build configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration here
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Write a JSON build report here
    #[arg(long)]
    report: Option<PathBuf>,
}

impl CommonArgs {
    fn effective_config(&self) -> Result<BuildConfig, error::ConfigError> {
        let mut config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => BuildConfig::default(),
        };
        if let Some(t) = self.table_size {
            config.table_size = t;
        }
        if let Some(n) = self.max_entries {
            config.max_entries = n;
        }
        if let Some(b) = self.budget {
            config.budget_bytes = b;
        }
        if self.prng.is_some() {
            config.prng = self.prng;
        }
        if self.chain_order.is_some() {
            config.chain_order = self.chain_order;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let (build, common, config) = match &cli.command {
        Command::Lines { lines, common } => {
            let config = common.effective_config()?;
            let build = match lines {
                Some(path) => {
                    let lines = app::read_lines_file(path)?;
                    app::build_from_lines(&lines, &path.display().to_string(), &config)?
                }
                None => app::build_from_lines(OPENING_LINES, "built-in opening lines", &config)?,
            };
            (build, common, config)
        }
        Command::Polyglot {
            book,
            max_ply,
            max_moves_per_position,
            common,
        } => {
            let mut config = common.effective_config()?;
            if let Some(p) = max_ply {
                config.max_ply = *p;
            }
            if let Some(m) = max_moves_per_position {
                config.max_moves_per_position = *m;
            }
            let build = app::build_from_polyglot(book, &config)?;
            (build, common, config)
        }
    };

    let format = common.format.unwrap_or_else(|| OutputFormat::from_path(&common.output));
    app::write_output(&build, format, &common.output)?;

    if let Some(path) = &common.report {
        app::write_report(&build.report, path)?;
    }
    if let Some(path) = &common.save_config {
        config::save_config(path, &config)?;
    }

    Ok(())
}
