//! Read models for board queries.
//!
//! A `BoardView` is the fully resolved shape a caller renders from: the
//! board, its columns in position order, each column's live cards in
//! position order, and each card's labels, checklists (with items) and
//! attachment metadata. Pure data, assembled by the engine.

use serde::{Deserialize, Serialize};

use crate::{
    attachment::Attachment,
    board::Board,
    card::Card,
    checklist::{Checklist, ChecklistItem},
    column::Column,
    label::Label,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub board: Board,
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
    pub column: Column,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub card: Card,
    pub labels: Vec<Label>,
    pub checklists: Vec<ChecklistView>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistView {
    pub checklist: Checklist,
    pub items: Vec<ChecklistItem>,
}
