// src/zobrist/tables.rs

use super::prng::{Lfsr, PrngVariant};
use crate::board::{CastlingRight, Piece, Square};
use crate::constants::{BOARD_SQUARES, CASTLING_RIGHTS, EP_FILES, PIECE_KINDS};

/// Random values the engine XORs into its position hash.
///
/// Built once per run and passed by reference to whatever needs to hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomTables {
    pub pieces: [[u16; BOARD_SQUARES]; PIECE_KINDS],
    pub side: u16,
    pub castling: [u16; CASTLING_RIGHTS],
    pub en_passant: [u16; EP_FILES],
}

impl RandomTables {
    pub fn generate(variant: PrngVariant) -> Self {
        Self::from_prng(&mut Lfsr::new(variant))
    }

    /// Draw order is fixed: every square of piece 0, then piece 1, ...,
    /// then side, castling 0..3, en passant files 0..7.
    pub fn from_prng(prng: &mut Lfsr) -> Self {
        let mut pieces = [[0u16; BOARD_SQUARES]; PIECE_KINDS];
        for squares in pieces.iter_mut() {
            for value in squares.iter_mut() {
                *value = prng.next_word();
            }
        }

        let side = prng.next_word();

        let mut castling = [0u16; CASTLING_RIGHTS];
        for value in castling.iter_mut() {
            *value = prng.next_word();
        }

        let mut en_passant = [0u16; EP_FILES];
        for value in en_passant.iter_mut() {
            *value = prng.next_word();
        }

        Self {
            pieces,
            side,
            castling,
            en_passant,
        }
    }

    pub fn piece(&self, piece: Piece, square: Square) -> u16 {
        self.pieces[piece.zobrist_index()][square.index()]
    }

    pub fn castling(&self, right: CastlingRight) -> u16 {
        self.castling[right as usize]
    }

    pub fn en_passant(&self, file: u8) -> u16 {
        self.en_passant[file as usize]
    }
}
