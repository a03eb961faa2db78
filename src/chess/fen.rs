use super::{Board, Color, Piece, Position};
use thiserror::Error;

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("invalid FEN string: expected piece placement and active color")]
    MissingFields,
    #[error("invalid FEN string: expected 8 rows")]
    BadRowCount,
    #[error("invalid FEN string: too many squares in row {0}")]
    RowOverflow(usize),
    #[error("invalid piece character in FEN string: {0}")]
    InvalidPiece(char),
    #[error("invalid FEN string: invalid active color")]
    InvalidColor,
}

/// Parses the piece placement and active color of a FEN string. The engine
/// tracks neither castling rights, en passant squares, nor move clocks, so
/// any trailing fields are accepted and ignored.
pub fn from_fen(fen: &str) -> Result<(Board, Color), FenError> {
    let mut parts = fen.split_whitespace();
    let placement = parts.next().ok_or(FenError::MissingFields)?;
    let active_color = parts.next().ok_or(FenError::MissingFields)?;

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::BadRowCount);
    }

    let mut board = Board::new();
    for (row_index, row) in rows.iter().enumerate() {
        // FEN lists rank 8 first
        let rank = 8 - row_index as u8;
        let mut col = 1u8;

        for c in row.chars() {
            if let Some(digit) = c.to_digit(10) {
                col += digit as u8;
            } else {
                if col > 8 {
                    return Err(FenError::RowOverflow(row_index));
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece(c))?;
                board.set_piece(Position::new(rank, col), Some(piece));
                col += 1;
            }
        }
        if col > 9 {
            return Err(FenError::RowOverflow(row_index));
        }
    }

    let turn = match active_color {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(FenError::InvalidColor),
    };

    Ok((board, turn))
}

/// Formats the board and side to move as a FEN string. The fields the
/// engine does not track are emitted as a literal "- - 0 1" tail so the
/// result keeps the standard six-field shape.
pub fn to_fen(board: &Board, turn: Color) -> String {
    let mut placement = String::new();

    for rank in (1..=8u8).rev() {
        let mut empty_count = 0;

        for col in 1..=8u8 {
            match board.get_piece(Position::new(rank, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        placement.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    placement.push(piece.to_char());
                }
                None => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            placement.push_str(&empty_count.to_string());
        }
        if rank > 1 {
            placement.push('/');
        }
    }

    let active_color = if turn == Color::White { "w" } else { "b" };
    format!("{} {} - - 0 1", placement, active_color)
}
