use super::fen::{self, FenError};
use super::{Board, Color, Move, Piece, PieceType, Position};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reasons `Game::make_move` rejects a move. This is the engine's only
/// caller-triggerable error; the check/mate/stalemate predicates and
/// `valid_moves` never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMoveError {
    #[error("no piece at start position")]
    NoPiece,
    #[error("not your turn")]
    WrongTurn,
    #[error("invalid move")]
    NotLegal,
}

/// A chess game: one board plus the side to move. Checkmate and stalemate
/// are computed predicates, not stored flags; callers re-query them after
/// every move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// Creates a game with the standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Board::new();
        board.reset();
        Self { board, turn: Color::White }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen_str: &str) -> Result<Self, FenError> {
        let (board, turn) = fen::from_fen(fen_str)?;
        Ok(Self { board, turn })
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(&self.board, self.turn)
    }

    /// Legal moves for the piece at `pos`, or None if the square is empty.
    ///
    /// Every pseudo-legal candidate is simulated on a scratch board and kept
    /// only if the mover's own king is not attacked afterwards; the scratch
    /// board is restored square-for-square between candidates.
    pub fn valid_moves(&self, pos: Position) -> Option<Vec<Move>> {
        let piece = self.board.get_piece(pos)?;
        let mut scratch = self.board.clone();
        let moves = piece
            .piece_moves(&self.board, pos)
            .into_iter()
            .filter(|&mv| Self::king_safe_after(&mut scratch, piece, mv))
            .collect();
        Some(moves)
    }

    /// Temporarily applies `mv`, tests the mover's king, then restores both
    /// squares (including "was empty") before returning.
    fn king_safe_after(board: &mut Board, piece: Piece, mv: Move) -> bool {
        let captured = board.get_piece(mv.to);
        board.set_piece(mv.to, Some(piece));
        board.set_piece(mv.from, None);
        let safe = !Self::color_in_check(board, piece.color);
        board.set_piece(mv.from, Some(piece));
        board.set_piece(mv.to, captured);
        safe
    }

    /// Validates and applies a move: the origin must hold a piece of the
    /// side to move and the move must be a member of `valid_moves(mv.from)`.
    /// A promotion places a fresh piece of the promoted kind. This is the
    /// only operation that permanently mutates the board.
    pub fn make_move(&mut self, mv: Move) -> Result<(), InvalidMoveError> {
        let piece = self.board.get_piece(mv.from).ok_or(InvalidMoveError::NoPiece)?;
        if piece.color != self.turn {
            return Err(InvalidMoveError::WrongTurn);
        }
        let valid = self.valid_moves(mv.from).unwrap_or_default();
        if !valid.contains(&mv) {
            return Err(InvalidMoveError::NotLegal);
        }

        let placed = match mv.promotion {
            Some(kind) => Piece { color: self.turn, kind },
            None => piece,
        };
        self.board.set_piece(mv.to, Some(placed));
        self.board.set_piece(mv.from, None);
        self.turn = self.turn.opposite();
        debug!("applied {}, {:?} to move", mv.as_algebraic(), self.turn);
        Ok(())
    }

    /// True if any enemy piece has a pseudo-legal move onto the king's
    /// square. A board without that color's king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        Self::color_in_check(&self.board, color)
    }

    fn color_in_check(board: &Board, color: Color) -> bool {
        let Some(king_pos) = Self::find_king(board, color) else {
            return false;
        };
        board
            .pieces_with_coordinates()
            .filter(|(_, piece)| piece.color != color)
            .any(|(pos, piece)| piece.piece_moves(board, pos).iter().any(|mv| mv.to == king_pos))
    }

    fn find_king(board: &Board, color: Color) -> Option<Position> {
        board
            .pieces_with_coordinates()
            .find(|(_, piece)| piece.kind == PieceType::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    fn has_legal_moves(&self, color: Color) -> bool {
        self.board
            .pieces_with_coordinates()
            .filter(|(_, piece)| piece.color == color)
            .any(|(pos, _)| self.valid_moves(pos).is_some_and(|moves| !moves.is_empty()))
    }

    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::assert_moves;
    use super::*;

    fn all_valid_moves(game: &Game, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (pos, piece) in game.board().pieces_with_coordinates() {
            if piece.color == color {
                moves.extend(game.valid_moves(pos).unwrap());
            }
        }
        moves
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board().pieces_with_coordinates().count(), 32);
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_in_check(Color::Black));
    }

    #[test]
    fn test_twenty_opening_moves_per_side() {
        // 8 single steps + 8 double steps + 4 knight moves
        let game = Game::new();
        assert_eq!(all_valid_moves(&game, Color::White).len(), 20);
        assert_eq!(all_valid_moves(&game, Color::Black).len(), 20);

        assert_moves(
            game.valid_moves(Position::from_algebraic("e2")).unwrap().into_iter(),
            vec!["e2e3", "e2e4"],
        );
        assert_moves(
            game.valid_moves(Position::from_algebraic("b1")).unwrap().into_iter(),
            vec!["b1a3", "b1c3"],
        );
    }

    #[test]
    fn test_valid_moves_empty_square() {
        let game = Game::new();
        assert_eq!(game.valid_moves(Position::from_algebraic("e4")), None);
    }

    #[test]
    fn test_valid_moves_pinned_piece() {
        // The rook on b2 shields the king from the queen on d4 and may not move
        let game = Game::from_fen("1k6/8/8/8/3q4/8/1R6/K7 w - - 0 1").unwrap();
        assert_moves(game.valid_moves(Position::from_algebraic("b2")).unwrap().into_iter(), vec![]);
        assert_moves(
            game.valid_moves(Position::from_algebraic("a1")).unwrap().into_iter(),
            vec!["a1a2", "a1b1"],
        );
    }

    #[test]
    fn test_valid_moves_never_leave_own_king_in_check() {
        let positions = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            "1k6/8/8/8/3q4/8/1R6/K7 w - - 0 1",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w - - 1 3",
        ];
        for fen_str in positions {
            let game = Game::from_fen(fen_str).unwrap();
            for color in [Color::White, Color::Black] {
                for mv in all_valid_moves(&game, color) {
                    let mut replay = game.clone();
                    replay.set_turn(color);
                    replay.make_move(mv).unwrap();
                    assert!(
                        !replay.is_in_check(color),
                        "{} leaves own king in check in {}",
                        mv.as_algebraic(),
                        fen_str
                    );
                }
            }
        }
    }

    #[test]
    fn test_valid_moves_restores_board() {
        let game = Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3P4/4P3/2N2Q1p/PPPB1PPP/R3K2R w - - 0 1").unwrap();
        let before = game.board().clone();
        for (pos, _) in game.board().pieces_with_coordinates() {
            game.valid_moves(pos).unwrap();
        }
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn test_make_move_no_piece() {
        let mut game = Game::new();
        let before = game.clone();
        let result = game.make_move(Move::from_algebraic("e4e5"));
        assert_eq!(result, Err(InvalidMoveError::NoPiece));
        assert_eq!(game, before);
    }

    #[test]
    fn test_make_move_wrong_turn() {
        let mut game = Game::new();
        let before = game.clone();
        let result = game.make_move(Move::from_algebraic("e7e5"));
        assert_eq!(result, Err(InvalidMoveError::WrongTurn));
        assert_eq!(game, before);
    }

    #[test]
    fn test_make_move_not_legal() {
        let mut game = Game::new();
        let before = game.clone();
        let result = game.make_move(Move::from_algebraic("e2e5"));
        assert_eq!(result, Err(InvalidMoveError::NotLegal));
        assert_eq!(game, before);

        // A bishop cannot jump over its own pawns
        let result = game.make_move(Move::from_algebraic("c1e3"));
        assert_eq!(result, Err(InvalidMoveError::NotLegal));
        assert_eq!(game, before);
    }

    #[test]
    fn test_make_move_flips_turn_and_moves_piece() {
        let mut game = Game::new();
        game.make_move(Move::from_algebraic("e2e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().get_piece(Position::from_algebraic("e2")), None);
        assert_eq!(
            game.board().get_piece(Position::from_algebraic("e4")),
            Some(Piece { color: Color::White, kind: PieceType::Pawn })
        );
    }

    #[test]
    fn test_make_move_capture() {
        let mut game = Game::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        game.make_move(Move::from_algebraic("e4d5")).unwrap();
        assert_eq!(
            game.board().get_piece(Position::from_algebraic("d5")),
            Some(Piece { color: Color::White, kind: PieceType::Pawn })
        );
        assert_eq!(game.board().pieces_with_coordinates().count(), 3);
    }

    #[test]
    fn test_make_move_promotion() {
        let mut game = Game::from_fen("8/6P1/8/8/8/8/8/8 w - - 0 1").unwrap();

        // A plain move to the promotion rank is never legal
        let before = game.clone();
        let result = game.make_move(Move::from_algebraic("g7g8"));
        assert_eq!(result, Err(InvalidMoveError::NotLegal));
        assert_eq!(game, before);

        game.make_move(Move::from_algebraic("g7g8q")).unwrap();
        assert_eq!(
            game.board().get_piece(Position::from_algebraic("g8")),
            Some(Piece { color: Color::White, kind: PieceType::Queen })
        );
        assert_eq!(game.board().get_piece(Position::from_algebraic("g7")), None);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn test_promotion_square_yields_exactly_four_moves() {
        let game = Game::from_fen("8/6P1/8/8/8/8/8/8 w - - 0 1").unwrap();
        let moves = game.valid_moves(Position::from_algebraic("g7")).unwrap();
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.promotion.is_some()));
    }

    #[test]
    fn test_is_in_check() {
        let game = Game::from_fen("4k3/8/8/8/8/8/8/4R3 w - - 0 1").unwrap();
        assert!(game.is_in_check(Color::Black));
        assert!(!game.is_in_check(Color::White));

        // A blocking piece breaks the line
        let game = Game::from_fen("4k3/8/4n3/8/8/8/8/4R3 w - - 0 1").unwrap();
        assert!(!game.is_in_check(Color::Black));
    }

    #[test]
    fn test_missing_king_is_never_in_check() {
        let game = Game::from_fen("8/8/8/8/8/8/8/4R3 w - - 0 1").unwrap();
        assert!(!game.is_in_check(Color::Black));
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_in_checkmate(Color::Black));
    }

    #[test]
    fn test_fools_mate() {
        let mut game = Game::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.make_move(Move::from_algebraic(mv)).unwrap();
        }
        assert!(game.is_in_check(Color::White));
        assert!(game.is_in_checkmate(Color::White));
        assert!(!game.is_in_stalemate(Color::White));
        assert!(all_valid_moves(&game, Color::White).is_empty());

        // The winning side is unaffected
        assert!(!game.is_in_checkmate(Color::Black));
    }

    #[test]
    fn test_back_rank_mate() {
        let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
        assert!(!game.is_in_checkmate(Color::Black));

        let game = Game::from_fen("4R1k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(game.is_in_checkmate(Color::Black));
    }

    #[test]
    fn test_stalemate() {
        // Black to move: the king on h8 is not attacked but has no safe square
        let game = Game::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(game.is_in_stalemate(Color::Black));
        assert!(!game.is_in_checkmate(Color::Black));
        assert!(!game.is_in_stalemate(Color::White));
    }

    #[test]
    fn test_checkmate_is_not_stalemate() {
        let mut game = Game::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.make_move(Move::from_algebraic(mv)).unwrap();
        }
        assert!(!game.is_in_stalemate(Color::White));
    }

    #[test]
    fn test_fen_round_trip() {
        let game = Game::new();
        assert_eq!(game.to_fen(), fen::INITIAL_POSITION);
        assert_eq!(Game::from_fen(&game.to_fen()).unwrap(), game);
    }
}
