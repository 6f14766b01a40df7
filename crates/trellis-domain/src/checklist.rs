use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::CardId;

pub type ChecklistId = Uuid;
pub type ChecklistItemId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub id: ChecklistId,
    pub card_id: CardId,
    pub title: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Checklist {
    pub fn new(card_id: CardId, title: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            card_id,
            title,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub checklist_id: ChecklistId,
    pub text: String,
    #[serde(default)]
    pub is_checked: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChecklistItem {
    pub fn new(checklist_id: ChecklistId, text: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            checklist_id,
            text,
            is_checked: false,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.is_checked = checked;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_unchecked() {
        let item = ChecklistItem::new(Uuid::new_v4(), "Write tests".to_string(), 0);
        assert!(!item.is_checked);

        let mut item = item;
        item.set_checked(true);
        assert!(item.is_checked);
        item.set_checked(false);
        assert!(!item.is_checked);
    }
}
