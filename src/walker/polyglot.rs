// src/walker/polyglot.rs
//
// Polyglot .bin books. Lookups use shakmaty's Polyglot-compatible zobrist
// keys and its legal move generator; the engine hash never touches this.

use super::graph::{Candidate, MoveTable};
use crate::board::{Kind, Square};
use crate::constants::POLYGLOT_RECORD_SIZE;
use crate::error::PolyglotError;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position as _};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyglotMove {
    pub raw: u16,
    pub weight: u16,
}

/// All records of a book, grouped by position key in file order.
#[derive(Clone, Debug, Default)]
pub struct PolyglotBook {
    moves: HashMap<u64, Vec<PolyglotMove>>,
    records: usize,
}

impl PolyglotBook {
    pub fn open(path: &Path) -> Result<Self, PolyglotError> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Parses big-endian 16-byte records; a trailing partial record is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut book = Self::default();
        for record in bytes.chunks_exact(POLYGLOT_RECORD_SIZE) {
            let mut key = [0u8; 8];
            key.copy_from_slice(&record[0..8]);
            let raw = u16::from_be_bytes([record[8], record[9]]);
            let weight = u16::from_be_bytes([record[10], record[11]]);
            book.moves
                .entry(u64::from_be_bytes(key))
                .or_default()
                .push(PolyglotMove { raw, weight });
            book.records += 1;
        }
        book
    }

    pub fn unique_positions(&self) -> usize {
        self.moves.len()
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn key(pos: &Chess) -> u64 {
        pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
    }

    pub fn moves(&self, key: u64) -> &[PolyglotMove] {
        self.moves.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Polyglot move bits as a UCI string. Castling comes out king-takes-rook
/// ("e1h1"), the same spelling shakmaty uses in Chess960 mode.
pub fn polyglot_uci(raw: u16) -> String {
    let square = |bits: u16| {
        let file = (b'a' + (bits & 7) as u8) as char;
        let rank = (b'1' + ((bits >> 3) & 7) as u8) as char;
        format!("{file}{rank}")
    };
    let mut uci = square(raw >> 6);
    uci.push_str(&square(raw));
    match (raw >> 12) & 7 {
        1 => uci.push('n'),
        2 => uci.push('b'),
        3 => uci.push('r'),
        4 => uci.push('q'),
        _ => {}
    }
    uci
}

fn parse_uci(uci: &str) -> Option<(Square, Square, Option<Kind>)> {
    let from = Square::parse(uci.get(0..2)?)?;
    let to = Square::parse(uci.get(2..4)?)?;
    let promotion = match uci.get(4..) {
        Some("") | None => None,
        Some(p) => Some(Kind::from_char(p.chars().next()?.to_ascii_uppercase())?),
    };
    Some((from, to, promotion))
}

impl MoveTable for PolyglotBook {
    type Node = Chess;

    fn root(&self) -> Chess {
        Chess::default()
    }

    fn candidates(&self, node: &Chess) -> Vec<Candidate<Chess>> {
        let mut ordered = self.moves(Self::key(node)).to_vec();
        if ordered.is_empty() {
            return Vec::new();
        }
        ordered.sort_by(|a, b| b.weight.cmp(&a.weight));

        let legal = node.legal_moves();
        ordered
            .iter()
            .filter_map(|pm| {
                let wanted = polyglot_uci(pm.raw);
                let m = legal
                    .iter()
                    .find(|m| m.to_uci(CastlingMode::Chess960).to_string() == wanted)?;
                let (from, to, promotion) = parse_uci(&m.to_uci(CastlingMode::Standard).to_string())?;
                let mut next = node.clone();
                next.play_unchecked(*m);
                Some(Candidate {
                    from,
                    to,
                    promotion,
                    next,
                })
            })
            .collect()
    }
}
