//! Lifecycle policy helpers.
//!
//! Pure functions encoding the rules around completion, restore placement,
//! and board activation. The engine's lifecycle controller applies these
//! against the store.

use crate::{
    board::{Board, BoardId},
    card::Card,
    column::{Column, ColumnId},
    ordering,
};

/// The column that counts as "completed" for a board: the one titled
/// "Done" (case-insensitive), or the rightmost column when no such title
/// exists. `None` only for a board with no columns.
pub fn resolve_completion_column(columns: &[Column], board_id: BoardId) -> Option<ColumnId> {
    let board_columns: Vec<&Column> = columns.iter().filter(|c| c.board_id == board_id).collect();

    board_columns
        .iter()
        .find(|c| c.title.eq_ignore_ascii_case("done"))
        .or_else(|| board_columns.iter().max_by_key(|c| c.position))
        .map(|c| c.id)
}

/// Where a restored card lands: appended after the column's live cards.
/// Its pre-archive position may have been taken in the meantime, so the
/// stored value is never reused.
pub fn restore_position(cards: &[Card], column_id: ColumnId) -> i32 {
    ordering::next_append_position(cards, |c| c.column_id == column_id && !c.is_archived)
}

/// True when `board_id` is the only active board left.
pub fn is_last_active_board(boards: &[Board], board_id: BoardId) -> bool {
    let mut active = boards.iter().filter(|b| b.is_active);
    match (active.next(), active.next()) {
        (Some(only), None) => only.id == board_id,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns_titled(board_id: BoardId, titles: &[&str]) -> Vec<Column> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Column::new(board_id, title.to_string(), i as i32))
            .collect()
    }

    #[test]
    fn completion_column_prefers_done_title() {
        let board = Board::new("Test".to_string(), None);
        let cols = columns_titled(board.id, &["Backlog", "done", "Archive"]);
        assert_eq!(
            resolve_completion_column(&cols, board.id),
            Some(cols[1].id)
        );
    }

    #[test]
    fn completion_column_falls_back_to_rightmost() {
        let board = Board::new("Test".to_string(), None);
        let cols = columns_titled(board.id, &["Backlog", "In Progress", "Shipped"]);
        assert_eq!(
            resolve_completion_column(&cols, board.id),
            Some(cols[2].id)
        );
    }

    #[test]
    fn completion_column_none_without_columns() {
        let board = Board::new("Test".to_string(), None);
        assert_eq!(resolve_completion_column(&[], board.id), None);
    }

    #[test]
    fn completion_column_ignores_other_boards() {
        let board = Board::new("Mine".to_string(), None);
        let other = Board::new("Other".to_string(), None);
        let mut cols = columns_titled(board.id, &["Todo"]);
        cols.extend(columns_titled(other.id, &["Done"]));
        assert_eq!(
            resolve_completion_column(&cols, board.id),
            Some(cols[0].id)
        );
    }

    #[test]
    fn restore_appends_after_live_cards() {
        let column_id = uuid::Uuid::new_v4();
        let mut cards = vec![
            Card::new(column_id, "A".to_string(), 0),
            Card::new(column_id, "B".to_string(), 1),
        ];
        cards[1].is_archived = true;
        assert_eq!(restore_position(&cards, column_id), 1);
    }

    #[test]
    fn last_active_board_detection() {
        let mut boards = vec![
            Board::new("One".to_string(), None),
            Board::new("Two".to_string(), None),
        ];
        assert!(!is_last_active_board(&boards, boards[0].id));

        boards[1].set_active(false);
        assert!(is_last_active_board(&boards, boards[0].id));
        assert!(!is_last_active_board(&boards, boards[1].id));
    }
}
