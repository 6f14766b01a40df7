use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{column::ColumnId, field_update::FieldUpdate, label::LabelId};

pub type CardId = Uuid;

/// Card priority, stored as its wire code: 1 = High, 2 = Medium, 3 = Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CardPriority {
    High,
    Medium,
    Low,
}

impl CardPriority {
    pub const fn code(self) -> u8 {
        match self {
            CardPriority::High => 1,
            CardPriority::Medium => 2,
            CardPriority::Low => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CardPriority::High => "High",
            CardPriority::Medium => "Medium",
            CardPriority::Low => "Low",
        }
    }

    /// Create-time parsing: a missing or out-of-range code resolves to
    /// Medium. Updates go through `TryFrom` instead, which rejects.
    pub fn parse_or_medium(raw: Option<u8>) -> Self {
        raw.and_then(|code| Self::try_from(code).ok())
            .unwrap_or(CardPriority::Medium)
    }
}

impl Default for CardPriority {
    fn default() -> Self {
        CardPriority::Medium
    }
}

impl TryFrom<u8> for CardPriority {
    type Error = trellis_core::TrellisError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(CardPriority::High),
            2 => Ok(CardPriority::Medium),
            3 => Ok(CardPriority::Low),
            other => Err(trellis_core::TrellisError::Validation(format!(
                "priority must be 1 (High), 2 (Medium) or 3 (Low), got {}",
                other
            ))),
        }
    }
}

impl From<CardPriority> for u8 {
    fn from(priority: CardPriority) -> u8 {
        priority.code()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: CardPriority,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub label_ids: Vec<LabelId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a card. `position`, `column_id` and `is_archived`
/// are deliberately absent: moves go through the position manager and
/// archival through the lifecycle controller.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub priority: Option<CardPriority>,
    pub start_date: FieldUpdate<NaiveDate>,
    pub due_date: FieldUpdate<NaiveDate>,
}

impl Card {
    pub fn new(column_id: ColumnId, title: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            column_id,
            title,
            description: None,
            position,
            start_date: None,
            due_date: None,
            priority: CardPriority::Medium,
            is_archived: false,
            label_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: CardUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.description.apply_to(&mut self.description);
        if let Some(priority) = updates.priority {
            self.priority = priority;
        }
        updates.start_date.apply_to(&mut self.start_date);
        updates.due_date.apply_to(&mut self.due_date);
        self.updated_at = Utc::now();
    }

    pub fn move_to_column(&mut self, column_id: ColumnId, position: i32) {
        self.column_id = column_id;
        self.position = position;
        self.updated_at = Utc::now();
    }

    pub fn set_archived(&mut self, archived: bool) {
        self.is_archived = archived;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_card_defaults_to_medium_priority() {
        let card = Card::new(Uuid::new_v4(), "Task".to_string(), 0);
        assert_eq!(card.priority, CardPriority::Medium);
        assert!(!card.is_archived);
        assert!(card.label_ids.is_empty());
    }

    #[test]
    fn priority_codes_round_trip() {
        for priority in [CardPriority::High, CardPriority::Medium, CardPriority::Low] {
            assert_eq!(CardPriority::try_from(priority.code()).unwrap(), priority);
        }
        assert_eq!(CardPriority::High.code(), 1);
        assert_eq!(CardPriority::Low.code(), 3);
    }

    #[test]
    fn create_input_coerces_to_medium() {
        assert_eq!(CardPriority::parse_or_medium(None), CardPriority::Medium);
        assert_eq!(CardPriority::parse_or_medium(Some(0)), CardPriority::Medium);
        assert_eq!(CardPriority::parse_or_medium(Some(9)), CardPriority::Medium);
        assert_eq!(CardPriority::parse_or_medium(Some(1)), CardPriority::High);
    }

    #[test]
    fn update_input_rejects_out_of_range() {
        assert!(CardPriority::try_from(0).is_err());
        assert!(CardPriority::try_from(4).is_err());
    }

    #[test]
    fn priority_serializes_as_code() {
        let json = serde_json::to_string(&CardPriority::High).unwrap();
        assert_eq!(json, "1");
        let parsed: CardPriority = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, CardPriority::Low);
        assert!(serde_json::from_str::<CardPriority>("7").is_err());
    }

    #[test]
    fn update_applies_partial_fields() {
        let mut card = Card::new(Uuid::new_v4(), "Task".to_string(), 0);
        card.update(CardUpdate {
            title: None,
            description: FieldUpdate::Set("details".to_string()),
            priority: Some(CardPriority::High),
            start_date: FieldUpdate::NoChange,
            due_date: FieldUpdate::Set(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        });
        assert_eq!(card.title, "Task");
        assert_eq!(card.description.as_deref(), Some("details"));
        assert_eq!(card.priority, CardPriority::High);
        assert_eq!(card.due_date, NaiveDate::from_ymd_opt(2025, 6, 1));

        card.update(CardUpdate {
            due_date: FieldUpdate::Clear,
            ..Default::default()
        });
        assert_eq!(card.due_date, None);
        assert_eq!(card.priority, CardPriority::High);
    }
}
