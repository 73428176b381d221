// src/error.rs

use crate::board::Square;
use thiserror::Error;

/// Why a single move could not be applied to a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySource(Square),
    #[error("en passant capture finds no pawn on {0}")]
    MissingEnPassantVictim(Square),
    #[error("castling finds no rook on {0}")]
    MissingCastlingRook(Square),
}

/// Why a SAN token could not be turned into a concrete move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("cannot parse move token '{0}'")]
    Malformed(String),
    #[error("no piece can play '{0}'")]
    NoCandidate(String),
    #[error(transparent)]
    Move(#[from] MoveError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("table size must be between 1 and 65535")]
    BadTableSize(usize),
    #[error("{0} entries do not fit a 16-bit entry count")]
    TooManyEntries(usize),
    #[error("chain link to entry {index} does not fit below the chain-end byte")]
    LinkOverflow { index: usize },
    #[error("book needs {size} bytes but only {budget} are reserved")]
    OverBudget { size: usize, budget: usize },
}

#[derive(Debug, Error)]
pub enum PolyglotError {
    #[error("failed to read polyglot book: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that stops a build after configuration is settled.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Polyglot(#[from] PolyglotError),
    #[error("{path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("build report: {0}")]
    Report(#[from] serde_json::Error),
}
