pub mod fen;
pub mod model;
pub use model::{Color, Move, Piece, PieceType, Position, Square};

mod board;
mod game;
mod move_generation;
#[cfg(test)]
pub mod test_utils;
pub use board::Board;
pub use game::{Game, InvalidMoveError};
