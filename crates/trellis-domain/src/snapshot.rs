//! Point-in-time capture of all board data.
//!
//! Serializable representation of the full entity store, used for
//! persistence and import/export. Every field defaults so partial or
//! older files still load.

use serde::{Deserialize, Serialize};

use crate::{
    attachment::Attachment,
    board::Board,
    card::Card,
    checklist::{Checklist, ChecklistItem},
    column::Column,
    label::Label,
    template::CardTemplate,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSnapshot {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub checklist_items: Vec<ChecklistItem>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub templates: Vec<CardTemplate>,
}

impl DataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
            && self.columns.is_empty()
            && self.cards.is_empty()
            && self.labels.is_empty()
            && self.checklists.is_empty()
            && self.checklist_items.is_empty()
            && self.attachments.is_empty()
            && self.templates.is_empty()
    }
}
