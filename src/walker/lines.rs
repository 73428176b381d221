// src/walker/lines.rs

use crate::board::san::resolve;
use crate::board::{Kind, Position, Square};
use crate::book::BookFact;
use crate::zobrist::RandomTables;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// A line that stopped early because one of its tokens did not resolve.
#[derive(Clone, Debug, Serialize)]
pub struct LineFailure {
    /// 1-based line number.
    pub line: usize,
    /// 1-based move number within the line.
    pub ply: usize,
    pub token: String,
    pub error: String,
}

#[derive(Clone, Debug, Default)]
pub struct ReplayOutcome {
    pub facts: Vec<BookFact>,
    pub failures: Vec<LineFailure>,
    pub lines: usize,
}

/// Replays each line from the start position, recording the move played
/// the first time each position hash is met. Later visits to a hash keep
/// the first move. A bad token abandons the rest of its line only.
pub fn replay_lines<S: AsRef<str>>(lines: &[S], tables: &RandomTables, max_entries: usize) -> ReplayOutcome {
    let mut outcome = ReplayOutcome {
        lines: lines.len(),
        ..Default::default()
    };
    let mut seen: HashSet<u16> = HashSet::new();
    if max_entries == 0 {
        return outcome;
    }

    'lines: for (line_idx, line) in lines.iter().enumerate() {
        let mut pos = Position::startpos();

        for (move_idx, token) in line.as_ref().split_whitespace().enumerate() {
            let hash = tables.hash(&pos);

            let next = match resolve(&pos, token) {
                Ok((mv, next)) => {
                    trace!(token, from = %mv.from, to = %mv.to, promotion = ?mv.promotion, "resolved");
                    next
                }
                Err(e) => {
                    warn!(line = line_idx + 1, ply = move_idx + 1, token, "line abandoned: {e}");
                    outcome.failures.push(LineFailure {
                        line: line_idx + 1,
                        ply: move_idx + 1,
                        token: token.to_string(),
                        error: e.to_string(),
                    });
                    break;
                }
            };

            if seen.insert(hash) {
                match played_squares(&pos, &next) {
                    Some((from, to)) => outcome.facts.push(BookFact::new(hash, from, to)),
                    None => debug!(line = line_idx + 1, ply = move_idx + 1, token, "no board change to record"),
                }
                if outcome.facts.len() >= max_entries {
                    warn!(max_entries, line = line_idx + 1, "entry cap reached, remaining lines skipped");
                    break 'lines;
                }
            }

            pos = next;
        }
    }

    outcome
}

/// Recovers the physical move from two consecutive positions.
///
/// From-square: a square the mover vacated. To-square: a square that now
/// holds one of the mover's pieces it did not hold before. Castling changes
/// two squares on each side; the king's squares win over the rook's.
/// En passant vacates the victim's square too, but the victim is not the
/// mover's, so it never competes.
pub fn played_squares(before: &Position, after: &Position) -> Option<(Square, Square)> {
    let mover = before.turn();
    let from = pick_king_first(
        Square::all().filter_map(|sq| {
            let was = before.piece_at(sq).filter(|p| p.color == mover)?;
            (after.piece_at(sq) != Some(was)).then_some((sq, was.kind))
        }),
    )?;
    let to = pick_king_first(Square::all().filter_map(|sq| {
        let now = after.piece_at(sq).filter(|p| p.color == mover)?;
        (before.piece_at(sq) != Some(now)).then_some((sq, now.kind))
    }))?;
    Some((from, to))
}

fn pick_king_first(changed: impl Iterator<Item = (Square, Kind)>) -> Option<Square> {
    let mut first = None;
    for (sq, kind) in changed {
        if kind == Kind::King {
            return Some(sq);
        }
        first.get_or_insert(sq);
    }
    first
}
