// app/mod.rs

use crate::book::asm::{write_asm, AsmOptions};
use crate::book::{compile, BookFact, CompiledBook};
use crate::config::{BuildConfig, Variant};
use crate::constants::{BOOK_LOAD_ADDRESS, ENTRY_SIZE, SLOT_SIZE};
use crate::error::BuildError;
use crate::walker::graph::{self, GraphLimits, WalkStats};
use crate::walker::lines::{replay_lines, LineFailure};
use crate::walker::polyglot::PolyglotBook;
use crate::zobrist::RandomTables;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Bin,
    Asm,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("asm") | Some("s") => OutputFormat::Asm,
            _ => OutputFormat::Bin,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BuildReport {
    pub variant: Variant,
    pub source: String,
    pub entries: usize,
    pub unique_positions: usize,
    pub failed_lines: Vec<LineFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walk: Option<WalkStats>,
    pub table_size: usize,
    pub bytes: usize,
}

pub struct Build {
    pub book: CompiledBook,
    pub report: BuildReport,
}

/// Blank lines and `#` comments are skipped.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_lines_file(path: &Path) -> Result<Vec<String>, BuildError> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_lines(&text))
}

pub fn build_from_lines<S: AsRef<str>>(lines: &[S], source: &str, config: &BuildConfig) -> Result<Build, BuildError> {
    let variant = Variant::Lines;
    let tables = RandomTables::generate(config.prng_for(variant));
    let outcome = replay_lines(lines, &tables, config.max_entries);
    info!(
        lines = outcome.lines,
        failed = outcome.failures.len(),
        entries = outcome.facts.len(),
        "lines replayed"
    );

    let book = finish(&outcome.facts, variant, config)?;
    let report = BuildReport {
        variant,
        source: source.to_string(),
        entries: book.len(),
        unique_positions: unique_hashes(&outcome.facts),
        failed_lines: outcome.failures,
        walk: None,
        table_size: book.table_size(),
        bytes: book.byte_size(),
    };
    Ok(Build { book, report })
}

pub fn build_from_polyglot(path: &Path, config: &BuildConfig) -> Result<Build, BuildError> {
    let polyglot = PolyglotBook::open(path)?;
    info!(
        positions = polyglot.unique_positions(),
        records = polyglot.record_count(),
        "polyglot book loaded"
    );

    let variant = Variant::Graph;
    let tables = RandomTables::generate(config.prng_for(variant));
    let limits = GraphLimits {
        max_ply: config.max_ply,
        max_entries: config.max_entries,
        max_moves_per_position: config.max_moves_per_position,
    };
    let outcome = graph::walk(&polyglot, &tables, &limits);

    let book = finish(&outcome.facts, variant, config)?;
    let report = BuildReport {
        variant,
        source: path.display().to_string(),
        entries: book.len(),
        unique_positions: outcome.stats.unique_positions,
        failed_lines: Vec::new(),
        walk: Some(outcome.stats),
        table_size: book.table_size(),
        bytes: book.byte_size(),
    };
    Ok(Build { book, report })
}

fn finish(facts: &[BookFact], variant: Variant, config: &BuildConfig) -> Result<CompiledBook, BuildError> {
    let book = compile(facts, config.table_size, config.chain_order_for(variant))?;
    book.check_budget(config.budget_bytes)?;
    if book.is_empty() {
        warn!("no book moves found, writing an empty book");
    }

    let unreachable = facts
        .iter()
        .filter(|f| !book.probe(f.hash).contains(&f.entry))
        .count();
    if unreachable > 0 {
        warn!(unreachable, "entries not reachable by probing their own hash");
    }
    Ok(book)
}

fn unique_hashes(facts: &[BookFact]) -> usize {
    facts.iter().map(|f| f.hash).collect::<HashSet<_>>().len()
}

pub fn write_output(build: &Build, format: OutputFormat, path: &Path) -> Result<(), BuildError> {
    let io_err = |source: std::io::Error| BuildError::Io {
        path: path.to_path_buf(),
        source,
    };

    match format {
        OutputFormat::Bin => fs::write(path, build.book.to_bytes()).map_err(io_err)?,
        OutputFormat::Asm => {
            let origin = match build.report.variant {
                Variant::Graph => Some(BOOK_LOAD_ADDRESS),
                Variant::Lines => None,
            };
            let opts = AsmOptions {
                source: &build.report.source,
                origin,
            };
            let file = fs::File::create(path).map_err(io_err)?;
            let mut out = BufWriter::new(file);
            write_asm(&build.book, &opts, &mut out).map_err(io_err)?;
            out.flush().map_err(io_err)?;
        }
    }

    let book = &build.book;
    info!(
        entries = book.len(),
        slot_bytes = book.table_size() * SLOT_SIZE,
        entry_bytes = book.len() * ENTRY_SIZE,
        "wrote {} ({:.1} KB)",
        path.display(),
        book.byte_size() as f64 / 1024.0
    );
    Ok(())
}

pub fn write_report(report: &BuildReport, path: &Path) -> Result<(), BuildError> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}
