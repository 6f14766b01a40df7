use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field_update::FieldUpdate;

pub type BoardId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_is_active() -> bool {
    true
}

/// Partial update for a board. Activation changes go through the
/// lifecycle controller, not through here.
#[derive(Debug, Clone, Default)]
pub struct BoardUpdate {
    pub name: Option<String>,
    pub description: FieldUpdate<String>,
}

impl Board {
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: BoardUpdate) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        updates.description.apply_to(&mut self.description);
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_active() {
        let board = Board::new("Test".to_string(), None);
        assert!(board.is_active);
        assert_eq!(board.description, None);
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut board = Board::new("Test".to_string(), Some("old".to_string()));
        board.update(BoardUpdate {
            name: Some("Renamed".to_string()),
            description: FieldUpdate::NoChange,
        });
        assert_eq!(board.name, "Renamed");
        assert_eq!(board.description.as_deref(), Some("old"));

        board.update(BoardUpdate {
            name: None,
            description: FieldUpdate::Clear,
        });
        assert_eq!(board.name, "Renamed");
        assert_eq!(board.description, None);
    }

    #[test]
    fn is_active_defaults_true_on_deserialize() {
        let json = r#"{
            "id": "f6a5c1a0-0000-0000-0000-000000000001",
            "name": "Old format",
            "description": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let board: Board = serde_json::from_str(json).unwrap();
        assert!(board.is_active);
    }
}
