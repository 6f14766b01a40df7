use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trellis_core::TrellisResult;

use crate::{
    attachment::{Attachment, AttachmentId},
    board::{Board, BoardId, BoardUpdate},
    card::{Card, CardId, CardPriority, CardUpdate},
    checklist::{Checklist, ChecklistId, ChecklistItem, ChecklistItemId},
    column::{Column, ColumnId, ColumnUpdate},
    label::{Label, LabelId},
    metrics::BoardMetrics,
    template::{CardDefinition, CardTemplate, TemplateId},
    views::{BoardView, CardView},
};

/// Filter options for listing cards. Archived cards are excluded unless
/// asked for explicitly.
#[derive(Debug, Default, Clone)]
pub struct CardFilter {
    pub board_id: Option<BoardId>,
    pub column_id: Option<ColumnId>,
    pub priority: Option<CardPriority>,
    pub include_archived: bool,
}

/// Fields for creating a card. `priority` is the raw wire code; a missing
/// or out-of-range value resolves to Medium.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<u8>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub label_ids: Vec<LabelId>,
}

impl NewCard {
    pub fn titled(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: None,
            priority: None,
            start_date: None,
            due_date: None,
            label_ids: Vec::new(),
        }
    }
}

/// Fields for registering attachment metadata. The byte payload has
/// already been handed to the blob collaborator under `storage_key`.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub card_id: CardId,
    pub original_filename: String,
    pub storage_key: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// A column together with its live cards in position order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnCards {
    pub column: Column,
    pub cards: Vec<Card>,
}

/// Result of a card move: the moved card plus the post-move state of the
/// source and destination columns (identical for a same-column move).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardMoveOutcome {
    pub card: Card,
    pub source: ColumnCards,
    pub destination: ColumnCards,
}

/// The full operations surface of the core. One implementor (the engine)
/// serves whatever request layer a caller brings; keeping every operation
/// on one trait means a new operation cannot be forgotten by a frontend.
pub trait BoardOperations {
    // Board operations
    fn create_board(&mut self, name: String, description: Option<String>) -> TrellisResult<Board>;
    fn get_board(&self, id: BoardId) -> TrellisResult<Board>;
    fn list_boards(&self) -> TrellisResult<Vec<Board>>;
    fn update_board(&mut self, id: BoardId, updates: BoardUpdate) -> TrellisResult<Board>;
    fn activate_board(&mut self, id: BoardId) -> TrellisResult<Board>;
    /// Fails with Conflict when `id` is the last active board.
    fn deactivate_board(&mut self, id: BoardId) -> TrellisResult<Board>;
    fn delete_board(&mut self, id: BoardId) -> TrellisResult<()>;

    // Column operations
    fn create_column(&mut self, board_id: BoardId, title: String) -> TrellisResult<Column>;
    fn list_columns(&self, board_id: BoardId) -> TrellisResult<Vec<Column>>;
    fn update_column(&mut self, id: ColumnId, updates: ColumnUpdate) -> TrellisResult<Column>;
    /// Reorder a column among its board's columns; the index is clamped
    /// to the end.
    fn move_column(&mut self, id: ColumnId, target_index: usize) -> TrellisResult<Vec<Column>>;
    fn delete_column(&mut self, id: ColumnId) -> TrellisResult<()>;

    // Card operations
    fn create_card(&mut self, new_card: NewCard) -> TrellisResult<Card>;
    fn get_card(&self, id: CardId) -> TrellisResult<Card>;
    fn list_cards(&self, filter: CardFilter) -> TrellisResult<Vec<Card>>;
    fn update_card(&mut self, id: CardId, updates: CardUpdate) -> TrellisResult<Card>;
    /// Remove the card from its source column, renumber the source to a
    /// dense run, and insert at `target_index` in the destination
    /// (clamped to the end), shifting trailing cards up.
    fn move_card(
        &mut self,
        id: CardId,
        destination_column_id: ColumnId,
        target_index: usize,
    ) -> TrellisResult<CardMoveOutcome>;
    fn archive_card(&mut self, id: CardId) -> TrellisResult<Card>;
    /// Restore an archived card; it reappears at the end of its column.
    fn unarchive_card(&mut self, id: CardId) -> TrellisResult<Card>;
    fn delete_card(&mut self, id: CardId) -> TrellisResult<()>;

    // Checklist operations
    fn create_checklist(&mut self, card_id: CardId, title: String) -> TrellisResult<Checklist>;
    fn move_checklist(
        &mut self,
        id: ChecklistId,
        target_index: usize,
    ) -> TrellisResult<Vec<Checklist>>;
    fn delete_checklist(&mut self, id: ChecklistId) -> TrellisResult<()>;
    fn create_checklist_item(
        &mut self,
        checklist_id: ChecklistId,
        text: String,
    ) -> TrellisResult<ChecklistItem>;
    fn toggle_checklist_item(
        &mut self,
        id: ChecklistItemId,
        checked: bool,
    ) -> TrellisResult<ChecklistItem>;
    fn move_checklist_item(
        &mut self,
        id: ChecklistItemId,
        target_index: usize,
    ) -> TrellisResult<Vec<ChecklistItem>>;
    fn delete_checklist_item(&mut self, id: ChecklistItemId) -> TrellisResult<()>;

    // Label operations
    fn create_label(
        &mut self,
        board_id: BoardId,
        name: String,
        color: String,
    ) -> TrellisResult<Label>;
    fn list_labels(&self, board_id: BoardId) -> TrellisResult<Vec<Label>>;
    fn delete_label(&mut self, id: LabelId) -> TrellisResult<()>;
    /// Attach labels to a card; every label must belong to the card's
    /// board. Already-attached labels are ignored.
    fn attach_labels_to_card(
        &mut self,
        card_id: CardId,
        label_ids: Vec<LabelId>,
    ) -> TrellisResult<Card>;
    fn detach_label_from_card(&mut self, card_id: CardId, label_id: LabelId)
        -> TrellisResult<Card>;

    // Attachment metadata
    fn register_attachment(&mut self, new_attachment: NewAttachment) -> TrellisResult<Attachment>;
    fn remove_attachment(&mut self, id: AttachmentId) -> TrellisResult<()>;

    // Templates
    fn create_template(
        &mut self,
        board_id: BoardId,
        name: String,
        description: Option<String>,
        definition: CardDefinition,
    ) -> TrellisResult<CardTemplate>;
    fn list_templates(&self, board_id: BoardId) -> TrellisResult<Vec<CardTemplate>>;
    fn delete_template(&mut self, id: TemplateId) -> TrellisResult<()>;
    fn instantiate_template(
        &mut self,
        template_id: TemplateId,
        destination_column_id: ColumnId,
    ) -> TrellisResult<CardView>;

    // Queries
    fn board_view(&self, board_id: BoardId) -> TrellisResult<BoardView>;
    fn board_metrics(&self, board_id: BoardId, today: NaiveDate) -> TrellisResult<BoardMetrics>;

    // Import/Export
    fn export_board(&self, board_id: Option<BoardId>) -> TrellisResult<String>;
    fn import_board(&mut self, data: &str) -> TrellisResult<Board>;
}
