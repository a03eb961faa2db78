use crate::chess::Game;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored game plus the metadata a hosting service carries alongside it.
/// The engine never reads the player or name fields; they are opaque
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u32,
    pub white_username: Option<String>,
    pub black_username: Option<String>,
    pub name: String,
    pub game: Game,
}

/// In-memory game storage. Ids are assigned sequentially starting at 1 and
/// are never reused until an explicit `clear` resets the sequence.
#[derive(Debug, Clone)]
pub struct GameStore {
    games: HashMap<u32, GameRecord>,
    next_id: u32,
}

impl GameStore {
    pub fn new() -> Self {
        Self { games: HashMap::new(), next_id: 1 }
    }

    /// Creates a fresh game with no players yet and returns its id.
    pub fn create_game(&mut self, name: &str) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let record = GameRecord {
            id,
            white_username: None,
            black_username: None,
            name: name.to_string(),
            game: Game::new(),
        };
        self.games.insert(id, record);
        debug!("created game {} ({})", id, name);
        id
    }

    pub fn get_game(&self, id: u32) -> Option<&GameRecord> {
        self.games.get(&id)
    }

    pub fn list_games(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.values()
    }

    /// Replaces the stored record with the same id.
    pub fn update_game(&mut self, record: GameRecord) {
        self.games.insert(record.id, record);
    }

    /// Drops every record and resets the id sequence.
    pub fn clear(&mut self) {
        self.games.clear();
        self.next_id = 1;
        debug!("game store cleared");
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
