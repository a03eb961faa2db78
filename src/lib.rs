pub mod chess;
pub mod storage;

pub use chess::{Board, Color, Game, InvalidMoveError, Move, Piece, PieceType, Position, Square};
pub use storage::{AuthRecord, AuthStore, GameRecord, GameStore};
