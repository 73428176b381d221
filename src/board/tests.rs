//! Move application tests.

use super::*;

fn sq(name: &str) -> Square {
    Square::parse(name).unwrap()
}

fn mv(pos: &Position, from: &str, to: &str) -> Position {
    pos.apply(sq(from), sq(to), None).unwrap()
}

fn total(pos: &Position) -> usize {
    pos.pieces().count()
}

#[test]
fn square_coordinates() {
    assert_eq!(sq("a8").index(), 0);
    assert_eq!(sq("h1").index(), 63);
    assert_eq!(sq("e2").index(), 52);
    assert_eq!(sq("a8").to_0x88(), 0x00);
    assert_eq!(sq("h1").to_0x88(), 0x77);
    assert_eq!(sq("e2").to_0x88(), 0x64);
    assert_eq!(sq("e4").to_0x88(), 0x44);
    assert_eq!(Square::from_0x88(0x44), Some(sq("e4")));
    assert_eq!(Square::from_0x88(0x08), None);
    assert_eq!(sq("c6").to_string(), "c6");
    assert_eq!(Square::parse("i1"), None);
    assert_eq!(Square::parse("e9"), None);
    assert_eq!(Square::parse("e22"), None);
}

#[test]
fn start_position_layout() {
    let pos = Position::startpos();
    assert_eq!(total(&pos), 32);
    assert_eq!(pos.piece_at(sq("e1")), Some(Piece::new(Color::White, Kind::King)));
    assert_eq!(pos.piece_at(sq("d8")), Some(Piece::new(Color::Black, Kind::Queen)));
    assert_eq!(pos.turn(), Color::White);
    assert_eq!(pos.castling(), Castling::ALL);
    assert_eq!(pos.ep_file(), None);
}

#[test]
fn empty_source_is_an_error() {
    let pos = Position::startpos();
    assert_eq!(
        pos.apply(sq("e4"), sq("e5"), None),
        Err(MoveError::EmptySource(sq("e4")))
    );
}

#[test]
fn apply_leaves_the_starting_position_alone() {
    let start = Position::startpos();
    let next = mv(&start, "g1", "f3");
    assert_eq!(start, Position::startpos());
    assert_ne!(start, next);
}

#[test]
fn quiet_moves_keep_piece_count() {
    let pos = mv(&Position::startpos(), "g1", "f3");
    assert_eq!(total(&pos), 32);
    assert_eq!(pos.turn(), Color::Black);
    assert_eq!(pos.ep_file(), None);
}

#[test]
fn double_push_sets_ep_file_and_next_move_clears_it() {
    let pos = mv(&Position::startpos(), "c2", "c4");
    assert_eq!(pos.ep_file(), Some(2));
    let pos = mv(&pos, "g8", "f6");
    assert_eq!(pos.ep_file(), None);
    let pos = mv(&pos, "d2", "d3");
    assert_eq!(pos.ep_file(), None);
}

#[test]
fn capture_removes_one_opposing_piece() {
    let pos = mv(&mv(&Position::startpos(), "e2", "e4"), "d7", "d5");
    let after = mv(&pos, "e4", "d5");
    assert_eq!(after.count(Color::Black), pos.count(Color::Black) - 1);
    assert_eq!(after.count(Color::White), pos.count(Color::White));
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let pos = [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("f7", "f5")]
        .iter()
        .fold(Position::startpos(), |p, (f, t)| mv(&p, f, t));
    assert_eq!(pos.ep_file(), Some(5));
    let after = mv(&pos, "e5", "f6");
    assert_eq!(after.piece_at(sq("f5")), None);
    assert_eq!(after.piece_at(sq("f6")), Some(Piece::new(Color::White, Kind::Pawn)));
    assert_eq!(after.count(Color::Black), pos.count(Color::Black) - 1);
}

#[test]
fn diagonal_pawn_move_without_victim_fails() {
    let pos = Position::startpos().with_piece(sq("e5"), Some(Piece::new(Color::White, Kind::Pawn)));
    assert_eq!(
        pos.apply(sq("e5"), sq("d6"), None),
        Err(MoveError::MissingEnPassantVictim(sq("d5")))
    );
}

#[test]
fn promotion_defaults_to_queen() {
    let pos = Position::empty()
        .with_piece(sq("g7"), Some(Piece::new(Color::White, Kind::Pawn)))
        .with_piece(sq("b2"), Some(Piece::new(Color::Black, Kind::Pawn)))
        .with_turn(Color::White);
    let queened = pos.apply(sq("g7"), sq("g8"), None).unwrap();
    assert_eq!(queened.piece_at(sq("g8")), Some(Piece::new(Color::White, Kind::Queen)));

    let rooked = queened.apply(sq("b2"), sq("b1"), Some(Kind::Rook)).unwrap();
    assert_eq!(rooked.piece_at(sq("b1")), Some(Piece::new(Color::Black, Kind::Rook)));
    assert_eq!(total(&rooked), 2);
}

#[test]
fn kingside_castling_moves_king_and_rook() {
    let pos = Position::startpos()
        .with_piece(sq("f1"), None)
        .with_piece(sq("g1"), None);
    let after = mv(&pos, "e1", "g1");
    assert_eq!(after.piece_at(sq("g1")), Some(Piece::new(Color::White, Kind::King)));
    assert_eq!(after.piece_at(sq("f1")), Some(Piece::new(Color::White, Kind::Rook)));
    assert_eq!(after.piece_at(sq("h1")), None);
    assert_eq!(after.piece_at(sq("e1")), None);
    assert_eq!(total(&after), total(&pos));
    assert!(!after.castling().has(CastlingRight::WhiteKingside));
    assert!(!after.castling().has(CastlingRight::WhiteQueenside));
    assert!(after.castling().has(CastlingRight::BlackKingside));
}

#[test]
fn queenside_castling_for_black() {
    let pos = Position::startpos()
        .with_piece(sq("b8"), None)
        .with_piece(sq("c8"), None)
        .with_piece(sq("d8"), None)
        .with_turn(Color::Black);
    let after = mv(&pos, "e8", "c8");
    assert_eq!(after.piece_at(sq("c8")), Some(Piece::new(Color::Black, Kind::King)));
    assert_eq!(after.piece_at(sq("d8")), Some(Piece::new(Color::Black, Kind::Rook)));
    assert_eq!(after.piece_at(sq("a8")), None);
    assert_eq!(total(&after), total(&pos));
    assert!(!after.castling().has(CastlingRight::BlackQueenside));
    assert!(after.castling().has(CastlingRight::WhiteQueenside));
}

#[test]
fn castling_without_rook_fails() {
    let pos = Position::startpos()
        .with_piece(sq("f1"), None)
        .with_piece(sq("g1"), None)
        .with_piece(sq("h1"), None);
    assert_eq!(
        pos.apply(sq("e1"), sq("g1"), None),
        Err(MoveError::MissingCastlingRook(sq("h1")))
    );
}

#[test]
fn one_step_king_move_clears_both_rights() {
    let pos = Position::startpos().with_piece(sq("e2"), None);
    let after = mv(&pos, "e1", "e2");
    assert!(!after.castling().has(CastlingRight::WhiteKingside));
    assert!(!after.castling().has(CastlingRight::WhiteQueenside));
    assert_eq!(total(&after), total(&pos));
}

#[test]
fn rook_move_clears_only_its_side() {
    let pos = Position::startpos().with_piece(sq("a2"), None);
    let after = mv(&pos, "a1", "a4");
    assert!(!after.castling().has(CastlingRight::WhiteQueenside));
    assert!(after.castling().has(CastlingRight::WhiteKingside));
}

#[test]
fn capture_on_rook_home_clears_right() {
    // bishop takes the h8 rook
    let pos = Position::startpos()
        .with_piece(sq("g7"), None)
        .with_piece(sq("b2"), None);
    let after = mv(&pos, "c1", "h6");
    let after = mv(&after, "a7", "a6");
    let after = mv(&after, "h6", "g7");
    let after = mv(&after, "a6", "a5");
    let after = mv(&after, "g7", "h8");
    assert!(!after.castling().has(CastlingRight::BlackKingside));
    assert!(after.castling().has(CastlingRight::BlackQueenside));
    assert_eq!(after.count(Color::Black), 14);
}

#[test]
fn side_to_move_always_flips() {
    let mut pos = Position::startpos();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
        let before = pos.turn();
        pos = mv(&pos, from, to);
        assert_eq!(pos.turn(), !before);
    }
}
