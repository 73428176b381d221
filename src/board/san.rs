// src/board/san.rs

use super::{file_from_char, rank_from_char, Color, Kind, Piece, Position, Square};
use crate::error::ResolveError;

/// A SAN token resolved against a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Kind>,
}

struct ParsedToken {
    kind: Kind,
    to: Square,
    file: Option<u8>,
    rank: Option<u8>,
    promotion: Option<Kind>,
}

#[cfg(test)]
impl Position {
    pub fn play_san(&self, token: &str) -> Result<Position, ResolveError> {
        resolve(self, token).map(|(_, next)| next)
    }
}

/// Resolves `token` and plays it, returning the move and the new position.
///
/// Pins and checks are not considered: when several pieces could make the
/// move, the first in board order whose application succeeds wins.
pub fn resolve(pos: &Position, token: &str) -> Result<(ResolvedMove, Position), ResolveError> {
    let cleaned: String = token
        .chars()
        .filter(|c| !matches!(c, '+' | '#' | 'x' | '!' | '?'))
        .collect();

    if let Some(to_file) = castling_target(&cleaned) {
        let rank = pos.turn().back_rank();
        let from = Square::from_coords(4, rank);
        let to = Square::from_coords(to_file, rank);
        let next = pos.apply(from, to, None)?;
        return Ok((ResolvedMove { from, to, promotion: None }, next));
    }

    let parsed = parse(&cleaned).ok_or_else(|| ResolveError::Malformed(token.to_string()))?;
    let wanted = Piece::new(pos.turn(), parsed.kind);

    let candidates: Vec<Square> = pos
        .pieces()
        .filter(|(_, piece)| *piece == wanted)
        .map(|(sq, _)| sq)
        .filter(|sq| parsed.file.map_or(true, |f| sq.file() == f))
        .filter(|sq| parsed.rank.map_or(true, |r| sq.rank() == r))
        .filter(|sq| reaches(pos, *sq, parsed.to))
        .collect();

    let mut last_error = None;
    for from in candidates {
        match pos.apply(from, parsed.to, parsed.promotion) {
            Ok(next) => {
                let mv = ResolvedMove {
                    from,
                    to: parsed.to,
                    promotion: parsed.promotion,
                };
                return Ok((mv, next));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(match last_error {
        Some(e) => ResolveError::Move(e),
        None => ResolveError::NoCandidate(token.to_string()),
    })
}

fn castling_target(token: &str) -> Option<u8> {
    match token {
        "O-O" | "0-0" => Some(6),
        "O-O-O" | "0-0-0" => Some(2),
        _ => None,
    }
}

fn parse(token: &str) -> Option<ParsedToken> {
    let (body, promotion) = match token.split_once('=') {
        Some((body, promo)) => {
            let kind = promo.chars().next().and_then(Kind::from_char)?;
            if matches!(kind, Kind::Pawn | Kind::King) {
                return None;
            }
            (body, Some(kind))
        }
        None => (token, None),
    };

    let mut chars: Vec<char> = body.chars().collect();
    let kind = match chars.first().copied().and_then(Kind::from_char) {
        Some(kind) if kind != Kind::Pawn => {
            chars.remove(0);
            kind
        }
        _ => Kind::Pawn,
    };

    if chars.len() < 2 {
        return None;
    }
    let split = chars.len() - 2;
    let to = Square::from_coords(file_from_char(chars[split])?, rank_from_char(chars[split + 1])?);

    let mut file = None;
    let mut rank = None;
    for c in &chars[..split] {
        if let Some(f) = file_from_char(*c) {
            file = Some(f);
        } else if let Some(r) = rank_from_char(*c) {
            rank = Some(r);
        } else {
            return None;
        }
    }

    Some(ParsedToken {
        kind,
        to,
        file,
        rank,
        promotion,
    })
}

/// Whether the piece on `from` could move to `to` by its movement pattern,
/// with sliding paths unobstructed. Says nothing about checks.
fn reaches(pos: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = pos.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    let target = pos.piece_at(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;

    match piece.kind {
        Kind::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
        Kind::Bishop => df.abs() == dr.abs() && path_clear(pos, from, to),
        Kind::Rook => (df == 0 || dr == 0) && path_clear(pos, from, to),
        Kind::Queen => (df == 0 || dr == 0 || df.abs() == dr.abs()) && path_clear(pos, from, to),
        Kind::King => df.abs() <= 1 && dr.abs() <= 1,
        Kind::Pawn => {
            let (dir, home) = match piece.color {
                Color::White => (1, 1),
                Color::Black => (-1, 6),
            };
            if df == 0 {
                if target.is_some() {
                    return false;
                }
                if dr == dir {
                    return true;
                }
                dr == 2 * dir && from.rank() == home && path_clear(pos, from, to)
            } else if df.abs() == 1 && dr == dir {
                // en passant: the file was just double-pushed and the
                // pawn that did it sits beside us
                target.is_some() || (pos.ep_file() == Some(to.file()) && en_passant_victim(pos, from, to))
            } else {
                false
            }
        }
    }
}

fn en_passant_victim(pos: &Position, from: Square, to: Square) -> bool {
    let victim = Square::from_coords(to.file(), from.rank());
    pos.piece_at(victim)
        .is_some_and(|p| p.kind == Kind::Pawn && p.color != pos.turn())
}

fn path_clear(pos: &Position, from: Square, to: Square) -> bool {
    let df = (to.file() as i8 - from.file() as i8).signum();
    let dr = (to.rank() as i8 - from.rank() as i8).signum();
    let mut file = from.file() as i8 + df;
    let mut rank = from.rank() as i8 + dr;
    while let Some(sq) = Square::try_from_coords(file, rank) {
        if sq == to {
            return true;
        }
        if pos.piece_at(sq).is_some() {
            return false;
        }
        file += df;
        rank += dr;
    }
    false
}
