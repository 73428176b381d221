// src/board/mod.rs

pub mod san;

#[cfg(test)]
mod tests;

use crate::error::MoveError;
use std::fmt;
use std::ops::Not;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Rank index (0 = rank 1) the side's king and rooks start on.
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    pub fn from_char(c: char) -> Option<Kind> {
        match c {
            'P' => Some(Kind::Pawn),
            'N' => Some(Kind::Knight),
            'B' => Some(Kind::Bishop),
            'R' => Some(Kind::Rook),
            'Q' => Some(Kind::Queen),
            'K' => Some(Kind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: Kind,
}

impl Piece {
    pub const fn new(color: Color, kind: Kind) -> Self {
        Self { color, kind }
    }

    /// White P,N,B,R,Q,K = 0..5, black = 6..11.
    pub fn zobrist_index(self) -> usize {
        let base = match self.color {
            Color::White => 0,
            Color::Black => 6,
        };
        base + self.kind as usize
    }
}

/// A board square, stored as the engine's 64-square index: a8 = 0, h1 = 63.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// `file` 0..8 is a..h, `rank` 0..8 is 1..8.
    pub fn from_coords(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square((7 - rank) * 8 + file)
    }

    pub fn try_from_coords(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::from_coords(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn parse(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file = file_from_char(chars.next()?)?;
        let rank = rank_from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::from_coords(file, rank))
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub fn file(self) -> u8 {
        self.0 % 8
    }

    pub fn rank(self) -> u8 {
        7 - self.0 / 8
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// file + 16 * (7 - rank), the layout the engine's board uses.
    pub fn to_0x88(self) -> u8 {
        (7 - self.rank()) * 16 + self.file()
    }

    #[cfg(test)]
    pub fn from_0x88(sq: u8) -> Option<Square> {
        if sq & 0x88 != 0 {
            return None;
        }
        Some(Square::from_coords(sq & 7, 7 - (sq >> 4)))
    }
}

pub fn file_from_char(c: char) -> Option<u8> {
    ('a'..='h').contains(&c).then(|| c as u8 - b'a')
}

pub fn rank_from_char(c: char) -> Option<u8> {
    ('1'..='8').contains(&c).then(|| c as u8 - b'1')
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastlingRight {
    WhiteKingside = 0,
    WhiteQueenside = 1,
    BlackKingside = 2,
    BlackQueenside = 3,
}

impl CastlingRight {
    pub const ALL: [CastlingRight; 4] = [
        CastlingRight::WhiteKingside,
        CastlingRight::WhiteQueenside,
        CastlingRight::BlackKingside,
        CastlingRight::BlackQueenside,
    ];

    pub fn color(self) -> Color {
        match self {
            CastlingRight::WhiteKingside | CastlingRight::WhiteQueenside => Color::White,
            CastlingRight::BlackKingside | CastlingRight::BlackQueenside => Color::Black,
        }
    }

    /// The right tied to the rook that starts on `square`, if any.
    pub fn for_rook_home(square: Square) -> Option<CastlingRight> {
        match (square.file(), square.rank()) {
            (7, 0) => Some(CastlingRight::WhiteKingside),
            (0, 0) => Some(CastlingRight::WhiteQueenside),
            (7, 7) => Some(CastlingRight::BlackKingside),
            (0, 7) => Some(CastlingRight::BlackQueenside),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Castling([bool; 4]);

impl Castling {
    pub const ALL: Castling = Castling([true; 4]);
    pub const NONE: Castling = Castling([false; 4]);

    pub fn has(self, right: CastlingRight) -> bool {
        self.0[right as usize]
    }

    fn clear(&mut self, right: CastlingRight) {
        self.0[right as usize] = false;
    }

    fn clear_color(&mut self, color: Color) {
        for right in CastlingRight::ALL {
            if right.color() == color {
                self.clear(right);
            }
        }
    }
}

/// Board contents plus the state the engine hashes. A value type: moves
/// return a new `Position` and never touch the one they started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; 64],
    turn: Color,
    castling: Castling,
    ep_file: Option<u8>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

impl Position {
    pub fn empty() -> Self {
        Self {
            board: [None; 64],
            turn: Color::White,
            castling: Castling::NONE,
            ep_file: None,
        }
    }

    pub fn startpos() -> Self {
        let mut pos = Self::empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            pos.board[Square::from_coords(file, 0).index()] = Some(Piece::new(Color::White, *kind));
            pos.board[Square::from_coords(file, 1).index()] = Some(Piece::new(Color::White, Kind::Pawn));
            pos.board[Square::from_coords(file, 6).index()] = Some(Piece::new(Color::Black, Kind::Pawn));
            pos.board[Square::from_coords(file, 7).index()] = Some(Piece::new(Color::Black, *kind));
        }
        pos.castling = Castling::ALL;
        pos
    }

    #[cfg(test)]
    pub fn with_piece(mut self, square: Square, piece: Option<Piece>) -> Self {
        self.board[square.index()] = piece;
        self
    }

    #[cfg(test)]
    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    #[cfg(test)]
    pub fn without_castling(mut self, right: CastlingRight) -> Self {
        self.castling.clear(right);
        self
    }

    #[cfg(test)]
    pub fn with_ep_file(mut self, file: Option<u8>) -> Self {
        self.ep_file = file;
        self
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn ep_file(&self) -> Option<u8> {
        self.ep_file
    }

    /// Occupied squares in index order (a8, b8, ..., h1).
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    #[cfg(test)]
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Plays `from -> to` without any legality check.
    ///
    /// Handles captures, en passant, the en passant file, promotion (queen
    /// unless told otherwise), the rook hop of castling and loss of castling
    /// rights. The side to move always flips.
    pub fn apply(&self, from: Square, to: Square, promotion: Option<Kind>) -> Result<Position, MoveError> {
        let mut piece = self.piece_at(from).ok_or(MoveError::EmptySource(from))?;
        let captured = self.piece_at(to);
        let mut next = *self;
        next.ep_file = None;

        match piece.kind {
            Kind::Pawn => {
                if from.rank().abs_diff(to.rank()) == 2 {
                    next.ep_file = Some(from.file());
                }
                if from.file() != to.file() && captured.is_none() {
                    let victim = Square::from_coords(to.file(), from.rank());
                    if next.board[victim.index()].take().is_none() {
                        return Err(MoveError::MissingEnPassantVictim(victim));
                    }
                }
                if to.rank() == 0 || to.rank() == 7 {
                    piece = Piece::new(piece.color, promotion.unwrap_or(Kind::Queen));
                }
            }
            Kind::King => {
                if from.file() == 4 && from.rank() == to.rank() && to.file().abs_diff(4) == 2 {
                    let (rook_file, rook_dest) = if to.file() == 6 { (7, 5) } else { (0, 3) };
                    let rook_from = Square::from_coords(rook_file, from.rank());
                    let rook = next.board[rook_from.index()]
                        .take()
                        .ok_or(MoveError::MissingCastlingRook(rook_from))?;
                    next.board[Square::from_coords(rook_dest, from.rank()).index()] = Some(rook);
                }
                next.castling.clear_color(piece.color);
            }
            Kind::Rook => {
                if let Some(right) = CastlingRight::for_rook_home(from) {
                    if right.color() == piece.color {
                        next.castling.clear(right);
                    }
                }
            }
            _ => {}
        }

        // Anything landing on a rook's home square ends that castling right.
        if let Some(right) = CastlingRight::for_rook_home(to) {
            next.castling.clear(right);
        }

        next.board[from.index()] = None;
        next.board[to.index()] = Some(piece);
        next.turn = !self.turn;
        Ok(next)
    }
}
