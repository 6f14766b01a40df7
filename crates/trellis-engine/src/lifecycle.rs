//! Cascade deletion.
//!
//! Descendants go first, bottom-up, then the entity itself. Each function
//! collects ids up front and removes with `retain`, so a cascade is a
//! straight-line sequence of infallible mutations: once it starts it
//! completes, and no partial cascade is ever observable. Returned storage
//! keys belong to removed attachment metadata; the engine forwards them
//! to the blob collaborator after the store mutation is done.

use trellis_domain::{BoardId, CardId, ChecklistId, ColumnId};

use crate::store::Store;

pub(crate) fn delete_checklist_cascade(store: &mut Store, checklist_id: ChecklistId) {
    store
        .checklist_items
        .retain(|item| item.checklist_id != checklist_id);
    store.checklists.retain(|c| c.id != checklist_id);
}

pub(crate) fn delete_card_cascade(store: &mut Store, card_id: CardId) -> Vec<String> {
    let checklist_ids: Vec<ChecklistId> = store
        .checklists
        .iter()
        .filter(|c| c.card_id == card_id)
        .map(|c| c.id)
        .collect();
    store
        .checklist_items
        .retain(|item| !checklist_ids.contains(&item.checklist_id));
    store.checklists.retain(|c| c.card_id != card_id);

    let storage_keys: Vec<String> = store
        .attachments
        .iter()
        .filter(|a| a.card_id == card_id)
        .map(|a| a.storage_key.clone())
        .collect();
    store.attachments.retain(|a| a.card_id != card_id);

    store.cards.retain(|c| c.id != card_id);
    storage_keys
}

/// Deletes the column's cards, archived ones included, with their
/// subtrees.
pub(crate) fn delete_column_cascade(store: &mut Store, column_id: ColumnId) -> Vec<String> {
    let card_ids: Vec<CardId> = store
        .cards
        .iter()
        .filter(|c| c.column_id == column_id)
        .map(|c| c.id)
        .collect();

    let mut storage_keys = Vec::new();
    for card_id in card_ids {
        storage_keys.extend(delete_card_cascade(store, card_id));
    }
    store.columns.retain(|c| c.id != column_id);
    storage_keys
}

pub(crate) fn delete_board_cascade(store: &mut Store, board_id: BoardId) -> Vec<String> {
    let column_ids: Vec<ColumnId> = store
        .columns
        .iter()
        .filter(|c| c.board_id == board_id)
        .map(|c| c.id)
        .collect();

    let mut storage_keys = Vec::new();
    for column_id in column_ids {
        storage_keys.extend(delete_column_cascade(store, column_id));
    }
    store.labels.retain(|l| l.board_id != board_id);
    store.templates.retain(|t| t.board_id != board_id);
    store.boards.retain(|b| b.id != board_id);
    storage_keys
}
