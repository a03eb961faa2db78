use super::{Color, Piece, PieceType, Position, Square};
use serde::{Deserialize, Serialize};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8x8 grid of optional pieces. Rows and columns are addressed through
/// 1-based `Position`s; bounds are enforced there, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Square; 8]; 8],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self { squares: [[Square::Empty; 8]; 8] }
    }

    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        match self.squares[pos.row as usize - 1][pos.col as usize - 1] {
            Square::Occupied(piece) => Some(piece),
            Square::Empty => None,
        }
    }

    /// Places a piece on the square; None clears it.
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row as usize - 1][pos.col as usize - 1] = match piece {
            Some(piece) => Square::Occupied(piece),
            None => Square::Empty,
        };
    }

    /// Clears the board and sets up the standard starting position: white
    /// back rank on row 1, black on row 8, pawns on rows 2 and 7.
    pub fn reset(&mut self) {
        self.squares = [[Square::Empty; 8]; 8];
        for col in 1..=8u8 {
            let kind = BACK_RANK[col as usize - 1];
            self.set_piece(Position::new(1, col), Some(Piece { color: Color::White, kind }));
            self.set_piece(
                Position::new(2, col),
                Some(Piece { color: Color::White, kind: PieceType::Pawn }),
            );
            self.set_piece(
                Position::new(7, col),
                Some(Piece { color: Color::Black, kind: PieceType::Pawn }),
            );
            self.set_piece(Position::new(8, col), Some(Piece { color: Color::Black, kind }));
        }
    }

    /// Returns an iterator over all pieces on the board along with their coordinates.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (1..=8u8).flat_map(move |row| {
            (1..=8u8).filter_map(move |col| {
                let pos = Position::new(row, col);
                self.get_piece(pos).map(|piece| (pos, piece))
            })
        })
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        for row in (1..=8u8).rev() {
            board_representation.push_str(&format!("{} |", row));
            for col in 1..=8u8 {
                let square = match self.get_piece(Position::new(row, col)) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                };
                board_representation.push(' ');
                board_representation.push(square);
            }
            board_representation.push('\n');
        }
        board_representation.push_str("    a b c d e f g h\n");
        board_representation
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
