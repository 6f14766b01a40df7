//! The operations engine.
//!
//! Owns the entity store and implements [`BoardOperations`]. Every
//! mutation validates first and touches the store only once validation
//! has passed, so a failed call leaves no trace. Ordering changes go
//! through the functions in `trellis_domain::ordering`; existence and
//! archival changes go through the lifecycle controller. Callers that
//! need concurrent access wrap the engine in
//! [`SharedEngine`](crate::shared::SharedEngine).

use std::sync::Arc;

use chrono::NaiveDate;
use trellis_core::{TrellisError, TrellisResult};
use trellis_domain::{
    lifecycle as policy, metrics, ordering, Attachment, AttachmentId, Board, BoardId,
    BoardMetrics, BoardOperations, BoardUpdate, BoardView, Card, CardDefinition, CardFilter,
    CardId, CardMoveOutcome, CardPriority, CardTemplate, CardUpdate, CardView, Checklist,
    ChecklistId, ChecklistItem, ChecklistItemId, ChecklistView, Column, ColumnCards, ColumnId,
    ColumnUpdate, ColumnView, DataSnapshot, Label, LabelId, NewAttachment, NewCard, TemplateId,
};

use crate::{
    blob::{BlobStore, NoopBlobStore},
    lifecycle,
    store::Store,
};

/// Column titles seeded on first run, matching the classic board layout.
const SEED_COLUMNS: [&str; 3] = ["Backlog", "In Progress", "Done"];

pub struct Engine {
    pub(crate) store: Store,
    blobs: Arc<dyn BlobStore>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            blobs: Arc::new(NoopBlobStore),
        }
    }

    pub fn with_blob_store(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            store: Store::new(),
            blobs,
        }
    }

    pub fn from_snapshot(snapshot: DataSnapshot) -> Self {
        Self {
            store: Store::from_snapshot(snapshot),
            blobs: Arc::new(NoopBlobStore),
        }
    }

    pub fn snapshot(&self) -> DataSnapshot {
        self.store.to_snapshot()
    }

    /// Replace all state with the given snapshot, keeping the blob
    /// collaborator.
    pub fn restore(&mut self, snapshot: DataSnapshot) {
        self.store = Store::from_snapshot(snapshot);
    }

    /// First-run seeding: when no board exists yet, create an active one
    /// with the default columns. Returns the seeded board, or `None` when
    /// data was already present.
    pub fn seed_if_empty(&mut self, board_name: &str) -> TrellisResult<Option<Board>> {
        if !self.store.boards.is_empty() {
            return Ok(None);
        }
        let board = self.create_board(board_name.to_string(), None)?;
        for title in SEED_COLUMNS {
            self.create_column(board.id, title.to_string())?;
        }
        tracing::info!("Seeded board '{}' with default columns", board_name);
        Ok(Some(board))
    }

    fn release_blobs(&self, storage_keys: Vec<String>) {
        for key in storage_keys {
            if let Err(err) = self.blobs.release(&key) {
                tracing::warn!("Blob collaborator failed to release '{}': {}", key, err);
            }
        }
    }

    fn column_cards(&self, column_id: ColumnId) -> TrellisResult<ColumnCards> {
        let column = self.store.column(column_id)?.clone();
        let cards = self
            .store
            .live_cards_of_column(column_id)
            .into_iter()
            .cloned()
            .collect();
        Ok(ColumnCards { column, cards })
    }

    fn card_view(&self, card: &Card) -> CardView {
        let labels: Vec<Label> = card
            .label_ids
            .iter()
            .filter_map(|id| self.store.labels.iter().find(|l| l.id == *id))
            .cloned()
            .collect();
        let checklists: Vec<ChecklistView> = self
            .store
            .checklists_of_card(card.id)
            .into_iter()
            .map(|checklist| ChecklistView {
                checklist: checklist.clone(),
                items: self
                    .store
                    .items_of_checklist(checklist.id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();
        let attachments: Vec<Attachment> = self
            .store
            .attachments_of_card(card.id)
            .into_iter()
            .cloned()
            .collect();
        CardView {
            card: card.clone(),
            labels,
            checklists,
            attachments,
        }
    }
}

fn require_non_empty(value: &str, what: &str) -> TrellisResult<()> {
    if value.trim().is_empty() {
        Err(TrellisError::Validation(format!(
            "{} must not be empty",
            what
        )))
    } else {
        Ok(())
    }
}

impl BoardOperations for Engine {
    fn create_board(&mut self, name: String, description: Option<String>) -> TrellisResult<Board> {
        require_non_empty(&name, "board name")?;
        let board = Board::new(name, description);
        tracing::debug!("Created board {} '{}'", board.id, board.name);
        self.store.boards.push(board.clone());
        Ok(board)
    }

    fn get_board(&self, id: BoardId) -> TrellisResult<Board> {
        self.store.board(id).cloned()
    }

    fn list_boards(&self) -> TrellisResult<Vec<Board>> {
        Ok(self.store.boards.clone())
    }

    fn update_board(&mut self, id: BoardId, updates: BoardUpdate) -> TrellisResult<Board> {
        if let Some(name) = &updates.name {
            require_non_empty(name, "board name")?;
        }
        let board = self.store.board_mut(id)?;
        board.update(updates);
        Ok(board.clone())
    }

    fn activate_board(&mut self, id: BoardId) -> TrellisResult<Board> {
        let board = self.store.board_mut(id)?;
        board.set_active(true);
        Ok(board.clone())
    }

    fn deactivate_board(&mut self, id: BoardId) -> TrellisResult<Board> {
        let board = self.store.board(id)?;
        if board.is_active && policy::is_last_active_board(&self.store.boards, id) {
            return Err(TrellisError::Conflict(
                "cannot deactivate the last active board".to_string(),
            ));
        }
        let board = self.store.board_mut(id)?;
        board.set_active(false);
        tracing::debug!("Deactivated board {}", id);
        Ok(board.clone())
    }

    fn delete_board(&mut self, id: BoardId) -> TrellisResult<()> {
        let board = self.store.board(id)?;
        if board.is_active && policy::is_last_active_board(&self.store.boards, id) {
            return Err(TrellisError::Conflict(
                "cannot delete the last active board".to_string(),
            ));
        }
        let storage_keys = lifecycle::delete_board_cascade(&mut self.store, id);
        self.release_blobs(storage_keys);
        tracing::info!("Deleted board {} and its subtree", id);
        Ok(())
    }

    fn create_column(&mut self, board_id: BoardId, title: String) -> TrellisResult<Column> {
        require_non_empty(&title, "column title")?;
        self.store.board(board_id)?;
        let position =
            ordering::next_append_position(&self.store.columns, |c| c.board_id == board_id);
        let column = Column::new(board_id, title, position);
        tracing::debug!(
            "Created column {} '{}' at position {}",
            column.id,
            column.title,
            position
        );
        self.store.columns.push(column.clone());
        Ok(column)
    }

    fn list_columns(&self, board_id: BoardId) -> TrellisResult<Vec<Column>> {
        self.store.board(board_id)?;
        Ok(self
            .store
            .columns_of_board(board_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn update_column(&mut self, id: ColumnId, updates: ColumnUpdate) -> TrellisResult<Column> {
        if let Some(title) = &updates.title {
            require_non_empty(title, "column title")?;
        }
        let column = self.store.column_mut(id)?;
        column.update(updates);
        Ok(column.clone())
    }

    fn move_column(&mut self, id: ColumnId, target_index: usize) -> TrellisResult<Vec<Column>> {
        let board_id = self.store.column(id)?.board_id;
        ordering::compact_positions(&mut self.store.columns, |c| {
            c.board_id == board_id && c.id != id
        });
        let position = ordering::open_slot(
            &mut self.store.columns,
            |c| c.board_id == board_id && c.id != id,
            target_index,
        );
        self.store.column_mut(id)?.update_position(position);
        tracing::info!("Moved column {} to index {}", id, position);
        self.list_columns(board_id)
    }

    fn delete_column(&mut self, id: ColumnId) -> TrellisResult<()> {
        let board_id = self.store.column(id)?.board_id;
        let storage_keys = lifecycle::delete_column_cascade(&mut self.store, id);
        ordering::compact_positions(&mut self.store.columns, |c| c.board_id == board_id);
        self.release_blobs(storage_keys);
        tracing::info!("Deleted column {} and its cards", id);
        Ok(())
    }

    fn create_card(&mut self, new_card: NewCard) -> TrellisResult<Card> {
        require_non_empty(&new_card.title, "card title")?;
        let column = self.store.column(new_card.column_id)?;
        let board_id = column.board_id;
        let column_id = column.id;

        let mut label_ids: Vec<LabelId> = Vec::new();
        for label_id in &new_card.label_ids {
            let label = self.store.label(*label_id)?;
            if label.board_id != board_id {
                return Err(TrellisError::Validation(format!(
                    "label {} belongs to a different board",
                    label_id
                )));
            }
            if !label_ids.contains(label_id) {
                label_ids.push(*label_id);
            }
        }

        let position = ordering::next_append_position(&self.store.cards, |c| {
            c.column_id == column_id && !c.is_archived
        });
        let mut card = Card::new(column_id, new_card.title, position);
        card.description = new_card.description;
        card.priority = CardPriority::parse_or_medium(new_card.priority);
        card.start_date = new_card.start_date;
        card.due_date = new_card.due_date;
        card.label_ids = label_ids;

        tracing::debug!(
            "Created card {} '{}' in column {} at position {}",
            card.id,
            card.title,
            column_id,
            position
        );
        self.store.cards.push(card.clone());
        Ok(card)
    }

    fn get_card(&self, id: CardId) -> TrellisResult<Card> {
        self.store.card(id).cloned()
    }

    fn list_cards(&self, filter: CardFilter) -> TrellisResult<Vec<Card>> {
        let mut cards = self.store.cards.clone();

        if !filter.include_archived {
            cards.retain(|c| !c.is_archived);
        }
        if let Some(board_id) = filter.board_id {
            let board_columns: Vec<ColumnId> = self
                .store
                .columns
                .iter()
                .filter(|c| c.board_id == board_id)
                .map(|c| c.id)
                .collect();
            cards.retain(|c| board_columns.contains(&c.column_id));
        }
        if let Some(column_id) = filter.column_id {
            cards.retain(|c| c.column_id == column_id);
        }
        if let Some(priority) = filter.priority {
            cards.retain(|c| c.priority == priority);
        }

        cards.sort_by_key(|c| (c.column_id, c.position));
        Ok(cards)
    }

    fn update_card(&mut self, id: CardId, updates: CardUpdate) -> TrellisResult<Card> {
        if let Some(title) = &updates.title {
            require_non_empty(title, "card title")?;
        }
        let card = self.store.card_mut(id)?;
        card.update(updates);
        Ok(card.clone())
    }

    fn move_card(
        &mut self,
        id: CardId,
        destination_column_id: ColumnId,
        target_index: usize,
    ) -> TrellisResult<CardMoveOutcome> {
        let card = self.store.card(id)?;
        if card.is_archived {
            return Err(TrellisError::Validation(
                "an archived card cannot be moved; restore it first".to_string(),
            ));
        }
        let source_column_id = card.column_id;
        let destination = self.store.column(destination_column_id)?;
        let source = self.store.column(source_column_id)?;
        if destination.board_id != source.board_id {
            return Err(TrellisError::Validation(
                "cannot move a card to a column of a different board".to_string(),
            ));
        }

        // Close the gap in the source scope, then open a slot in the
        // destination. Excluding the moved card from both predicates makes
        // the same-column case fall out of the general one.
        ordering::compact_positions(&mut self.store.cards, |c| {
            c.column_id == source_column_id && !c.is_archived && c.id != id
        });
        let position = ordering::open_slot(
            &mut self.store.cards,
            |c| c.column_id == destination_column_id && !c.is_archived && c.id != id,
            target_index,
        );
        self.store
            .card_mut(id)?
            .move_to_column(destination_column_id, position);

        tracing::info!(
            "Moved card {} from column {} to column {} at index {}",
            id,
            source_column_id,
            destination_column_id,
            position
        );
        Ok(CardMoveOutcome {
            card: self.store.card(id)?.clone(),
            source: self.column_cards(source_column_id)?,
            destination: self.column_cards(destination_column_id)?,
        })
    }

    fn archive_card(&mut self, id: CardId) -> TrellisResult<Card> {
        let card = self.store.card(id)?;
        if card.is_archived {
            return Err(TrellisError::Validation(
                "card is already archived".to_string(),
            ));
        }
        let card = self.store.card_mut(id)?;
        card.set_archived(true);
        let card = card.clone();
        tracing::debug!("Archived card {}", id);
        Ok(card)
    }

    fn unarchive_card(&mut self, id: CardId) -> TrellisResult<Card> {
        let card = self.store.card(id)?;
        if !card.is_archived {
            return Err(TrellisError::Validation(
                "card is not archived".to_string(),
            ));
        }
        // Append behind the column's live cards; the slot the card held
        // before archiving may have been taken since.
        let position = policy::restore_position(&self.store.cards, card.column_id);
        let card = self.store.card_mut(id)?;
        card.set_archived(false);
        card.position = position;
        let card = card.clone();
        tracing::debug!("Restored card {} at position {}", id, position);
        Ok(card)
    }

    fn delete_card(&mut self, id: CardId) -> TrellisResult<()> {
        let column_id = self.store.card(id)?.column_id;
        let storage_keys = lifecycle::delete_card_cascade(&mut self.store, id);
        ordering::compact_positions(&mut self.store.cards, |c| {
            c.column_id == column_id && !c.is_archived
        });
        self.release_blobs(storage_keys);
        tracing::info!("Deleted card {} and its subtree", id);
        Ok(())
    }

    fn create_checklist(&mut self, card_id: CardId, title: String) -> TrellisResult<Checklist> {
        require_non_empty(&title, "checklist title")?;
        self.store.card(card_id)?;
        let position =
            ordering::next_append_position(&self.store.checklists, |c| c.card_id == card_id);
        let checklist = Checklist::new(card_id, title, position);
        self.store.checklists.push(checklist.clone());
        Ok(checklist)
    }

    fn move_checklist(
        &mut self,
        id: ChecklistId,
        target_index: usize,
    ) -> TrellisResult<Vec<Checklist>> {
        let card_id = self.store.checklist(id)?.card_id;
        ordering::compact_positions(&mut self.store.checklists, |c| {
            c.card_id == card_id && c.id != id
        });
        let position = ordering::open_slot(
            &mut self.store.checklists,
            |c| c.card_id == card_id && c.id != id,
            target_index,
        );
        if let Some(checklist) = self.store.checklists.iter_mut().find(|c| c.id == id) {
            checklist.position = position;
        }
        Ok(self
            .store
            .checklists_of_card(card_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn delete_checklist(&mut self, id: ChecklistId) -> TrellisResult<()> {
        let card_id = self.store.checklist(id)?.card_id;
        lifecycle::delete_checklist_cascade(&mut self.store, id);
        ordering::compact_positions(&mut self.store.checklists, |c| c.card_id == card_id);
        Ok(())
    }

    fn create_checklist_item(
        &mut self,
        checklist_id: ChecklistId,
        text: String,
    ) -> TrellisResult<ChecklistItem> {
        require_non_empty(&text, "checklist item text")?;
        self.store.checklist(checklist_id)?;
        let position = ordering::next_append_position(&self.store.checklist_items, |i| {
            i.checklist_id == checklist_id
        });
        let item = ChecklistItem::new(checklist_id, text, position);
        self.store.checklist_items.push(item.clone());
        Ok(item)
    }

    fn toggle_checklist_item(
        &mut self,
        id: ChecklistItemId,
        checked: bool,
    ) -> TrellisResult<ChecklistItem> {
        let item = self.store.checklist_item_mut(id)?;
        item.set_checked(checked);
        Ok(item.clone())
    }

    fn move_checklist_item(
        &mut self,
        id: ChecklistItemId,
        target_index: usize,
    ) -> TrellisResult<Vec<ChecklistItem>> {
        let checklist_id = self.store.checklist_item(id)?.checklist_id;
        ordering::compact_positions(&mut self.store.checklist_items, |i| {
            i.checklist_id == checklist_id && i.id != id
        });
        let position = ordering::open_slot(
            &mut self.store.checklist_items,
            |i| i.checklist_id == checklist_id && i.id != id,
            target_index,
        );
        if let Some(item) = self.store.checklist_items.iter_mut().find(|i| i.id == id) {
            item.position = position;
        }
        Ok(self
            .store
            .items_of_checklist(checklist_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn delete_checklist_item(&mut self, id: ChecklistItemId) -> TrellisResult<()> {
        let checklist_id = self.store.checklist_item(id)?.checklist_id;
        self.store.checklist_items.retain(|i| i.id != id);
        ordering::compact_positions(&mut self.store.checklist_items, |i| {
            i.checklist_id == checklist_id
        });
        Ok(())
    }

    fn create_label(
        &mut self,
        board_id: BoardId,
        name: String,
        color: String,
    ) -> TrellisResult<Label> {
        require_non_empty(&name, "label name")?;
        if !Label::validate_color(&color) {
            return Err(TrellisError::Validation(format!(
                "label color must be #RRGGBB hex, got '{}'",
                color
            )));
        }
        self.store.board(board_id)?;
        let label = Label::new(board_id, name, color);
        self.store.labels.push(label.clone());
        Ok(label)
    }

    fn list_labels(&self, board_id: BoardId) -> TrellisResult<Vec<Label>> {
        self.store.board(board_id)?;
        Ok(self
            .store
            .labels_of_board(board_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn delete_label(&mut self, id: LabelId) -> TrellisResult<()> {
        self.store.label(id)?;
        self.store.labels.retain(|l| l.id != id);
        for card in self.store.cards.iter_mut() {
            card.label_ids.retain(|label_id| *label_id != id);
        }
        Ok(())
    }

    fn attach_labels_to_card(
        &mut self,
        card_id: CardId,
        label_ids: Vec<LabelId>,
    ) -> TrellisResult<Card> {
        let card = self.store.card(card_id)?;
        let board_id = self.store.column(card.column_id)?.board_id;

        for label_id in &label_ids {
            let label = self.store.label(*label_id)?;
            if label.board_id != board_id {
                return Err(TrellisError::Validation(format!(
                    "label {} belongs to a different board",
                    label_id
                )));
            }
        }

        let card = self.store.card_mut(card_id)?;
        for label_id in label_ids {
            if !card.label_ids.contains(&label_id) {
                card.label_ids.push(label_id);
            }
        }
        card.updated_at = chrono::Utc::now();
        Ok(card.clone())
    }

    fn detach_label_from_card(
        &mut self,
        card_id: CardId,
        label_id: LabelId,
    ) -> TrellisResult<Card> {
        self.store.label(label_id)?;
        let card = self.store.card_mut(card_id)?;
        card.label_ids.retain(|id| *id != label_id);
        card.updated_at = chrono::Utc::now();
        Ok(card.clone())
    }

    fn register_attachment(&mut self, new_attachment: NewAttachment) -> TrellisResult<Attachment> {
        require_non_empty(&new_attachment.original_filename, "attachment filename")?;
        require_non_empty(&new_attachment.storage_key, "attachment storage key")?;
        require_non_empty(&new_attachment.mime_type, "attachment mime type")?;
        self.store.card(new_attachment.card_id)?;
        let attachment = Attachment::new(
            new_attachment.card_id,
            new_attachment.original_filename,
            new_attachment.storage_key,
            new_attachment.size_bytes,
            new_attachment.mime_type,
        );
        tracing::debug!(
            "Registered attachment {} for card {}",
            attachment.id,
            attachment.card_id
        );
        self.store.attachments.push(attachment.clone());
        Ok(attachment)
    }

    fn remove_attachment(&mut self, id: AttachmentId) -> TrellisResult<()> {
        let storage_key = self.store.attachment(id)?.storage_key.clone();
        self.store.attachments.retain(|a| a.id != id);
        self.release_blobs(vec![storage_key]);
        Ok(())
    }

    fn create_template(
        &mut self,
        board_id: BoardId,
        name: String,
        description: Option<String>,
        definition: CardDefinition,
    ) -> TrellisResult<CardTemplate> {
        require_non_empty(&name, "template name")?;
        definition.validate()?;
        self.store.board(board_id)?;
        let template = CardTemplate::new(board_id, name, description, definition);
        self.store.templates.push(template.clone());
        Ok(template)
    }

    fn list_templates(&self, board_id: BoardId) -> TrellisResult<Vec<CardTemplate>> {
        self.store.board(board_id)?;
        Ok(self
            .store
            .templates_of_board(board_id)
            .into_iter()
            .cloned()
            .collect())
    }

    fn delete_template(&mut self, id: TemplateId) -> TrellisResult<()> {
        self.store.template(id)?;
        self.store.templates.retain(|t| t.id != id);
        Ok(())
    }

    fn instantiate_template(
        &mut self,
        template_id: TemplateId,
        destination_column_id: ColumnId,
    ) -> TrellisResult<CardView> {
        let template = self.store.template(template_id)?.clone();
        let column = self.store.column(destination_column_id)?;
        if column.board_id != template.board_id {
            return Err(TrellisError::Validation(
                "template belongs to a different board than the destination column".to_string(),
            ));
        }
        template.definition.validate()?;

        let definition = &template.definition;
        let position = ordering::next_append_position(&self.store.cards, |c| {
            c.column_id == destination_column_id && !c.is_archived
        });
        let mut card = Card::new(destination_column_id, definition.title.clone(), position);
        card.description = definition.description.clone();
        card.priority = definition.priority.unwrap_or_default();
        let card_id = card.id;
        self.store.cards.push(card);

        // Checklists and items take dense positions in document order;
        // whatever positions the definition recorded never reach the
        // store.
        for (checklist_index, checklist_def) in definition.checklists.iter().enumerate() {
            let checklist = Checklist::new(
                card_id,
                checklist_def.title.clone(),
                checklist_index as i32,
            );
            for (item_index, item_def) in checklist_def.items.iter().enumerate() {
                let mut item =
                    ChecklistItem::new(checklist.id, item_def.text.clone(), item_index as i32);
                item.is_checked = item_def.is_checked;
                self.store.checklist_items.push(item);
            }
            self.store.checklists.push(checklist);
        }

        tracing::info!(
            "Instantiated template {} into column {} as card {}",
            template_id,
            destination_column_id,
            card_id
        );
        let card = self.store.card(card_id)?.clone();
        Ok(self.card_view(&card))
    }

    fn board_view(&self, board_id: BoardId) -> TrellisResult<BoardView> {
        let board = self.store.board(board_id)?.clone();
        let columns = self
            .store
            .columns_of_board(board_id)
            .into_iter()
            .map(|column| ColumnView {
                column: column.clone(),
                cards: self
                    .store
                    .live_cards_of_column(column.id)
                    .into_iter()
                    .map(|card| self.card_view(card))
                    .collect(),
            })
            .collect();
        Ok(BoardView { board, columns })
    }

    fn board_metrics(&self, board_id: BoardId, today: NaiveDate) -> TrellisResult<BoardMetrics> {
        self.store.board(board_id)?;
        Ok(metrics::compute_board_metrics(
            &self.store.columns,
            &self.store.cards,
            board_id,
            today,
        ))
    }

    fn export_board(&self, board_id: Option<BoardId>) -> TrellisResult<String> {
        let snapshot = match board_id {
            Some(id) => {
                let board = self.store.board(id)?.clone();
                let columns: Vec<Column> = self
                    .store
                    .columns
                    .iter()
                    .filter(|c| c.board_id == id)
                    .cloned()
                    .collect();
                let column_ids: Vec<ColumnId> = columns.iter().map(|c| c.id).collect();
                let cards: Vec<Card> = self
                    .store
                    .cards
                    .iter()
                    .filter(|c| column_ids.contains(&c.column_id))
                    .cloned()
                    .collect();
                let card_ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();
                let checklists: Vec<Checklist> = self
                    .store
                    .checklists
                    .iter()
                    .filter(|c| card_ids.contains(&c.card_id))
                    .cloned()
                    .collect();
                let checklist_ids: Vec<ChecklistId> = checklists.iter().map(|c| c.id).collect();
                DataSnapshot {
                    boards: vec![board],
                    columns,
                    cards,
                    labels: self
                        .store
                        .labels
                        .iter()
                        .filter(|l| l.board_id == id)
                        .cloned()
                        .collect(),
                    checklists,
                    checklist_items: self
                        .store
                        .checklist_items
                        .iter()
                        .filter(|i| checklist_ids.contains(&i.checklist_id))
                        .cloned()
                        .collect(),
                    attachments: self
                        .store
                        .attachments
                        .iter()
                        .filter(|a| card_ids.contains(&a.card_id))
                        .cloned()
                        .collect(),
                    templates: self
                        .store
                        .templates
                        .iter()
                        .filter(|t| t.board_id == id)
                        .cloned()
                        .collect(),
                }
            }
            None => self.store.to_snapshot(),
        };

        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| TrellisError::Serialization(e.to_string()))
    }

    fn import_board(&mut self, data: &str) -> TrellisResult<Board> {
        let imported: DataSnapshot =
            serde_json::from_str(data).map_err(|e| TrellisError::Serialization(e.to_string()))?;

        let board = imported
            .boards
            .first()
            .cloned()
            .ok_or_else(|| TrellisError::NotFound("No board in import".to_string()))?;

        self.store.boards.extend(imported.boards);
        self.store.columns.extend(imported.columns);
        self.store.cards.extend(imported.cards);
        self.store.labels.extend(imported.labels);
        self.store.checklists.extend(imported.checklists);
        self.store.checklist_items.extend(imported.checklist_items);
        self.store.attachments.extend(imported.attachments);
        self.store.templates.extend(imported.templates);

        tracing::info!("Imported board {} '{}'", board.id, board.name);
        Ok(board)
    }
}
