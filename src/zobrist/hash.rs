// src/zobrist/hash.rs

use super::tables::RandomTables;
use crate::board::{CastlingRight, Color, Position};

impl RandomTables {
    /// 16-bit fingerprint of `position`, recomputed from scratch.
    pub fn hash(&self, position: &Position) -> u16 {
        let mut h = 0u16;

        for (square, piece) in position.pieces() {
            h ^= self.piece(piece, square);
        }

        if position.turn() == Color::White {
            h ^= self.side;
        }

        for right in CastlingRight::ALL {
            if position.castling().has(right) {
                h ^= self.castling(right);
            }
        }

        if let Some(file) = position.ep_file() {
            h ^= self.en_passant(file);
        }

        h
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{CastlingRight, Color, Kind, Piece, Position, Square};
    use crate::zobrist::{PrngVariant, RandomTables};

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn start_position_hashes() {
        let start = Position::startpos();
        assert_eq!(RandomTables::generate(PrngVariant::Direct).hash(&start), 0xf0e1);
        assert_eq!(RandomTables::generate(PrngVariant::Mixed).hash(&start), 0xcc11);
    }

    #[test]
    fn known_opening_hashes() {
        let direct = RandomTables::generate(PrngVariant::Direct);
        let mixed = RandomTables::generate(PrngVariant::Mixed);
        let e4 = Position::startpos().apply(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(direct.hash(&e4), 0xd2a4);
        assert_eq!(mixed.hash(&e4), 0x63cb);

        let nf3 = e4
            .apply(sq("e7"), sq("e5"), None)
            .and_then(|p| p.apply(sq("g1"), sq("f3"), None))
            .unwrap();
        assert_eq!(direct.hash(&nf3), 0xa64c);
        assert_eq!(mixed.hash(&nf3), 0x2b04);
    }

    #[test]
    fn copies_hash_alike() {
        let tables = RandomTables::generate(PrngVariant::Direct);
        let pos = Position::startpos().apply(sq("d2"), sq("d4"), None).unwrap();
        let copy = pos;
        assert_eq!(tables.hash(&pos), tables.hash(&copy));
    }

    #[test]
    fn double_push_toggles_exactly_four_values() {
        let tables = RandomTables::generate(PrngVariant::Direct);
        let start = Position::startpos();
        let e4 = start.apply(sq("e2"), sq("e4"), None).unwrap();
        let pawn = Piece::new(Color::White, Kind::Pawn);
        let expected = tables.piece(pawn, sq("e2"))
            ^ tables.piece(pawn, sq("e4"))
            ^ tables.side
            ^ tables.en_passant(4);
        assert_eq!(tables.hash(&start) ^ tables.hash(&e4), expected);
    }

    #[test]
    fn single_attribute_toggles() {
        let tables = RandomTables::generate(PrngVariant::Mixed);
        let start = Position::startpos();
        let h = tables.hash(&start);

        let flipped = start.with_turn(Color::Black);
        assert_eq!(h ^ tables.hash(&flipped) ^ tables.side, 0);

        let no_wq = start.without_castling(CastlingRight::WhiteQueenside);
        assert_eq!(
            h ^ tables.hash(&no_wq) ^ tables.castling(CastlingRight::WhiteQueenside),
            0
        );

        let with_ep = start.with_ep_file(Some(2));
        assert_eq!(h ^ tables.hash(&with_ep) ^ tables.en_passant(2), 0);

        let knight = Piece::new(Color::Black, Kind::Knight);
        let no_knight = start.with_piece(sq("g8"), None);
        assert_eq!(h ^ tables.hash(&no_knight) ^ tables.piece(knight, sq("g8")), 0);
    }
}
