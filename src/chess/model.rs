use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

/// A piece is a plain (color, kind) value. Where it stands is the board's
/// business, so two white rooks on different squares compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };
        if self.color == Color::White {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceType::Pawn,
            'N' => PieceType::Knight,
            'B' => PieceType::Bishop,
            'R' => PieceType::Rook,
            'Q' => PieceType::Queen,
            'K' => PieceType::King,
            _ => return None,
        };
        Some(Self { color, kind })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

/// A 1-based board coordinate: row 1 is White's back rank, column 1 is the
/// a-file. Out-of-range positions must never be constructed.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            (1..=8).contains(&row) && (1..=8).contains(&col),
            "position out of range: ({}, {})",
            row,
            col
        );
        Self { row, col }
    }

    /// The position shifted by (d_row, d_col), or None if that falls off the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (1..=8).contains(&row) && (1..=8).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Self {
        let file = algebraic.chars().next().unwrap();
        let rank = algebraic.chars().nth(1).unwrap();
        let col = file as u8 - b'a' + 1;
        let row = rank as u8 - b'1' + 1;
        Self::new(row, col)
    }

    pub fn as_algebraic(&self) -> String {
        let file = (b'a' + self.col - 1) as char;
        format!("{}{}", file, self.row)
    }
}

/// Equality covers all three fields; legality checking is "is this exact
/// move in the legal-move set", so the promotion kind is load-bearing.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to, promotion: None }
    }

    pub fn with_promotion(mut self, promotion: PieceType) -> Self {
        self.promotion = Some(promotion);
        self
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic());
        if let Some(promo) = self.promotion {
            base_move + &promo.to_string().to_lowercase()
        } else {
            base_move
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Self {
        let from = Position::from_algebraic(&algebraic[0..2]);
        let to = Position::from_algebraic(&algebraic[2..4]);
        let promotion = algebraic.chars().nth(4).and_then(|c| match c.to_ascii_lowercase() {
            'q' => Some(PieceType::Queen),
            'r' => Some(PieceType::Rook),
            'b' => Some(PieceType::Bishop),
            'n' => Some(PieceType::Knight),
            _ => None,
        });
        Self { from, to, promotion }
    }
}
