use super::{Board, Color, Move, Piece, PieceType, Position};

impl Piece {
    /// Calculates all the squares this piece can move to from `from`,
    /// ignoring whether a move leaves its own king in check. That filter
    /// lives in `Game::valid_moves`. Castling and en passant are not
    /// generated.
    pub fn piece_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        match self.kind {
            PieceType::Pawn => self.pawn_moves(board, from),
            PieceType::Knight => self.knight_moves(board, from),
            PieceType::Bishop => self.bishop_moves(board, from),
            PieceType::Rook => self.rook_moves(board, from),
            PieceType::Queen => self.queen_moves(board, from),
            PieceType::King => self.king_moves(board, from),
        }
    }

    fn pawn_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        let forward: i8 = match self.color {
            Color::White => 1,
            Color::Black => -1,
        };
        let start_row = match self.color {
            Color::White => 2,
            Color::Black => 7,
        };
        let promotion_row = match self.color {
            Color::White => 8,
            Color::Black => 1,
        };

        // Regular forward move, only onto an empty square
        if let Some(step) = from.offset(forward, 0) {
            if board.get_piece(step).is_none() {
                Self::push_pawn_move(Move::new(from, step), promotion_row, &mut moves);

                // Double move from the start row. The intermediate square is
                // the single-step square checked above; the landing square
                // gets its own emptiness check so the pawn never jumps a
                // piece.
                if from.row == start_row {
                    if let Some(jump) = step.offset(forward, 0) {
                        if board.get_piece(jump).is_none() {
                            moves.push(Move::new(from, jump));
                        }
                    }
                }
            }
        }

        // Capture diagonally
        for d_col in [-1, 1] {
            if let Some(target) = from.offset(forward, d_col) {
                if let Some(piece) = board.get_piece(target) {
                    if piece.color != self.color {
                        Self::push_pawn_move(Move::new(from, target), promotion_row, &mut moves);
                    }
                }
            }
        }

        moves
    }

    /// A move onto the promotion row expands into the four promotable kinds.
    fn push_pawn_move(mv: Move, promotion_row: u8, moves: &mut Vec<Move>) {
        if mv.to.row == promotion_row {
            for promotion_piece in [PieceType::Queen, PieceType::Bishop, PieceType::Rook, PieceType::Knight] {
                moves.push(mv.with_promotion(promotion_piece));
            }
        } else {
            moves.push(mv);
        }
    }

    fn knight_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        const KNIGHT_MOVES: [(i8, i8); 8] =
            [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
        self.offset_moves(board, from, &KNIGHT_MOVES)
    }

    fn king_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        const KING_MOVES: [(i8, i8); 8] =
            [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
        self.offset_moves(board, from, &KING_MOVES)
    }

    fn bishop_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
        self.sliding_moves(board, from, &BISHOP_DIRECTIONS)
    }

    fn rook_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
        self.sliding_moves(board, from, &ROOK_DIRECTIONS)
    }

    fn queen_moves(&self, board: &Board, from: Position) -> Vec<Move> {
        const QUEEN_DIRECTIONS: [(i8, i8); 8] =
            [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];
        self.sliding_moves(board, from, &QUEEN_DIRECTIONS)
    }

    /// Walks each direction one square at a time: empty squares are quiet
    /// moves, an enemy piece is a capture that ends the ray, an own piece or
    /// the board edge ends the ray with no move.
    fn sliding_moves(&self, board: &Board, from: Position, directions: &[(i8, i8)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in directions {
            let mut current = from;
            while let Some(next) = current.offset(d_row, d_col) {
                match board.get_piece(next) {
                    None => moves.push(Move::new(from, next)),
                    Some(piece) => {
                        if piece.color != self.color {
                            moves.push(Move::new(from, next));
                        }
                        break; // Block sliding
                    }
                }
                current = next;
            }
        }
        moves
    }

    /// Single-step moves for the fixed king/knight offset sets.
    fn offset_moves(&self, board: &Board, from: Position, offsets: &[(i8, i8)]) -> Vec<Move> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in offsets {
            if let Some(to) = from.offset(d_row, d_col) {
                match board.get_piece(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(piece) if piece.color != self.color => moves.push(Move::new(from, to)),
                    Some(_) => {}
                }
            }
        }
        moves
    }
}
