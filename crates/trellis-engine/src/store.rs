//! The entity store.
//!
//! Authoritative in-memory collections for every entity type, with
//! id lookups that surface `NotFound` and list accessors that return
//! position-sorted references. The store never cascades and never
//! renumbers; those belong to the lifecycle controller and the ordering
//! functions, driven by the engine.

use trellis_core::{TrellisError, TrellisResult};
use trellis_domain::{
    Attachment, AttachmentId, Board, BoardId, Card, CardId, CardTemplate, Checklist, ChecklistId,
    ChecklistItem, ChecklistItemId, Column, ColumnId, DataSnapshot, Label, LabelId, TemplateId,
};

#[derive(Debug, Default)]
pub struct Store {
    pub(crate) boards: Vec<Board>,
    pub(crate) columns: Vec<Column>,
    pub(crate) cards: Vec<Card>,
    pub(crate) labels: Vec<Label>,
    pub(crate) checklists: Vec<Checklist>,
    pub(crate) checklist_items: Vec<ChecklistItem>,
    pub(crate) attachments: Vec<Attachment>,
    pub(crate) templates: Vec<CardTemplate>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Lookups

    pub fn board(&self, id: BoardId) -> TrellisResult<&Board> {
        self.boards
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| TrellisError::not_found("Board", id))
    }

    pub fn board_mut(&mut self, id: BoardId) -> TrellisResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| TrellisError::not_found("Board", id))
    }

    pub fn column(&self, id: ColumnId) -> TrellisResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TrellisError::not_found("Column", id))
    }

    pub fn column_mut(&mut self, id: ColumnId) -> TrellisResult<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TrellisError::not_found("Column", id))
    }

    pub fn card(&self, id: CardId) -> TrellisResult<&Card> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TrellisError::not_found("Card", id))
    }

    pub fn card_mut(&mut self, id: CardId) -> TrellisResult<&mut Card> {
        self.cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| TrellisError::not_found("Card", id))
    }

    pub fn label(&self, id: LabelId) -> TrellisResult<&Label> {
        self.labels
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| TrellisError::not_found("Label", id))
    }

    pub fn checklist(&self, id: ChecklistId) -> TrellisResult<&Checklist> {
        self.checklists
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| TrellisError::not_found("Checklist", id))
    }

    pub fn checklist_item(&self, id: ChecklistItemId) -> TrellisResult<&ChecklistItem> {
        self.checklist_items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| TrellisError::not_found("Checklist item", id))
    }

    pub fn checklist_item_mut(&mut self, id: ChecklistItemId) -> TrellisResult<&mut ChecklistItem> {
        self.checklist_items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| TrellisError::not_found("Checklist item", id))
    }

    pub fn attachment(&self, id: AttachmentId) -> TrellisResult<&Attachment> {
        self.attachments
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| TrellisError::not_found("Attachment", id))
    }

    pub fn template(&self, id: TemplateId) -> TrellisResult<&CardTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TrellisError::not_found("Template", id))
    }

    // Scope listings, sorted by position where the scope is ordered.

    pub fn columns_of_board(&self, board_id: BoardId) -> Vec<&Column> {
        trellis_domain::ordering::sorted_by_position(&self.columns, |c| c.board_id == board_id)
    }

    pub fn live_cards_of_column(&self, column_id: ColumnId) -> Vec<&Card> {
        trellis_domain::ordering::sorted_by_position(&self.cards, |c| {
            c.column_id == column_id && !c.is_archived
        })
    }

    pub fn checklists_of_card(&self, card_id: CardId) -> Vec<&Checklist> {
        trellis_domain::ordering::sorted_by_position(&self.checklists, |c| c.card_id == card_id)
    }

    pub fn items_of_checklist(&self, checklist_id: ChecklistId) -> Vec<&ChecklistItem> {
        trellis_domain::ordering::sorted_by_position(&self.checklist_items, |i| {
            i.checklist_id == checklist_id
        })
    }

    pub fn attachments_of_card(&self, card_id: CardId) -> Vec<&Attachment> {
        let mut attachments: Vec<&Attachment> = self
            .attachments
            .iter()
            .filter(|a| a.card_id == card_id)
            .collect();
        attachments.sort_by_key(|a| a.uploaded_at);
        attachments
    }

    pub fn labels_of_board(&self, board_id: BoardId) -> Vec<&Label> {
        self.labels.iter().filter(|l| l.board_id == board_id).collect()
    }

    pub fn templates_of_board(&self, board_id: BoardId) -> Vec<&CardTemplate> {
        self.templates
            .iter()
            .filter(|t| t.board_id == board_id)
            .collect()
    }

    // Snapshot conversion

    pub fn to_snapshot(&self) -> DataSnapshot {
        DataSnapshot {
            boards: self.boards.clone(),
            columns: self.columns.clone(),
            cards: self.cards.clone(),
            labels: self.labels.clone(),
            checklists: self.checklists.clone(),
            checklist_items: self.checklist_items.clone(),
            attachments: self.attachments.clone(),
            templates: self.templates.clone(),
        }
    }

    pub fn from_snapshot(snapshot: DataSnapshot) -> Self {
        Self {
            boards: snapshot.boards,
            columns: snapshot.columns,
            cards: snapshot.cards,
            labels: snapshot.labels,
            checklists: snapshot.checklists,
            checklist_items: snapshot.checklist_items,
            attachments: snapshot.attachments,
            templates: snapshot.templates,
        }
    }
}
