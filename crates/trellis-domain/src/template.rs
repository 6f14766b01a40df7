use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trellis_core::{TrellisError, TrellisResult};
use uuid::Uuid;

use crate::{board::BoardId, card::CardPriority};

pub type TemplateId = Uuid;

/// A reusable recipe for a card plus its checklist subtree.
///
/// The definition is an explicit typed structure validated when the
/// template is created, so instantiation can only fail on missing ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: TemplateId,
    pub board_id: BoardId,
    pub name: String,
    pub description: Option<String>,
    pub definition: CardDefinition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDefinition {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent means Medium at instantiation.
    #[serde(default)]
    pub priority: Option<CardPriority>,
    #[serde(default)]
    pub checklists: Vec<ChecklistDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistDefinition {
    pub title: String,
    /// Position as recorded when the template was captured. Instantiation
    /// renumbers in document order, so gaps here never reach the store.
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub text: String,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub position: i32,
}

impl CardTemplate {
    pub fn new(
        board_id: BoardId,
        name: String,
        description: Option<String>,
        definition: CardDefinition,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            name,
            description,
            definition,
            created_at: now,
            updated_at: now,
        }
    }
}

impl CardDefinition {
    /// Shape checks shared by template creation and instantiation
    /// (stored definitions may predate stricter rules).
    pub fn validate(&self) -> TrellisResult<()> {
        if self.title.trim().is_empty() {
            return Err(TrellisError::Validation(
                "template card title must not be empty".to_string(),
            ));
        }
        for checklist in &self.checklists {
            if checklist.title.trim().is_empty() {
                return Err(TrellisError::Validation(
                    "template checklist title must not be empty".to_string(),
                ));
            }
            for item in &checklist.items {
                if item.text.trim().is_empty() {
                    return Err(TrellisError::Validation(
                        "template checklist item text must not be empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}
