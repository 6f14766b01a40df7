//! Board metrics.
//!
//! A pure fold over one board's columns and live (non-archived) cards.
//! Nothing here mutates; callers may run it concurrently with any read
//! or write and observe whatever state was committed at the time.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    board::BoardId,
    card::{Card, CardPriority},
    column::{Column, ColumnId},
    lifecycle,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorityPercentages {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCardCount {
    pub column_id: ColumnId,
    pub title: String,
    pub card_count: usize,
    pub percent_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMetrics {
    pub total_cards: usize,
    pub total_columns: usize,
    pub average_cards_per_column: f64,
    pub priority_counts: PriorityCounts,
    pub priority_percentages: PriorityPercentages,
    pub overdue: usize,
    pub overdue_high_priority: usize,
    pub due_today: usize,
    pub due_next_seven_days: usize,
    pub completed_cards: usize,
    pub active_cards: usize,
    pub columns: Vec<ColumnCardCount>,
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Compute the metrics for one board as of `today`.
///
/// `columns` and `cards` may span several boards; only the given board's
/// columns and their non-archived cards are counted.
pub fn compute_board_metrics(
    columns: &[Column],
    cards: &[Card],
    board_id: BoardId,
    today: NaiveDate,
) -> BoardMetrics {
    let mut board_columns: Vec<&Column> =
        columns.iter().filter(|c| c.board_id == board_id).collect();
    board_columns.sort_by_key(|c| c.position);

    let live: Vec<&Card> = cards
        .iter()
        .filter(|card| {
            !card.is_archived && board_columns.iter().any(|col| col.id == card.column_id)
        })
        .collect();

    let total_cards = live.len();
    let total_columns = board_columns.len();

    let count_priority = |priority: CardPriority| -> usize {
        live.iter().filter(|c| c.priority == priority).count()
    };
    let priority_counts = PriorityCounts {
        high: count_priority(CardPriority::High),
        medium: count_priority(CardPriority::Medium),
        low: count_priority(CardPriority::Low),
    };
    let priority_percentages = PriorityPercentages {
        high: percent(priority_counts.high, total_cards),
        medium: percent(priority_counts.medium, total_cards),
        low: percent(priority_counts.low, total_cards),
    };

    let week_ahead = today
        .checked_add_days(Days::new(7))
        .unwrap_or(NaiveDate::MAX);
    let overdue = live
        .iter()
        .filter(|c| c.due_date.is_some_and(|d| d < today))
        .count();
    let overdue_high_priority = live
        .iter()
        .filter(|c| c.priority == CardPriority::High && c.due_date.is_some_and(|d| d < today))
        .count();
    let due_today = live.iter().filter(|c| c.due_date == Some(today)).count();
    let due_next_seven_days = live
        .iter()
        .filter(|c| c.due_date.is_some_and(|d| d >= today && d < week_ahead))
        .count();

    let completion_column = lifecycle::resolve_completion_column(columns, board_id);
    let completed_cards = completion_column
        .map(|col_id| live.iter().filter(|c| c.column_id == col_id).count())
        .unwrap_or(0);

    let column_counts: Vec<ColumnCardCount> = board_columns
        .iter()
        .map(|col| {
            let card_count = live.iter().filter(|c| c.column_id == col.id).count();
            ColumnCardCount {
                column_id: col.id,
                title: col.title.clone(),
                card_count,
                percent_of_total: percent(card_count, total_cards),
            }
        })
        .collect();

    BoardMetrics {
        total_cards,
        total_columns,
        average_cards_per_column: if total_columns == 0 {
            0.0
        } else {
            total_cards as f64 / total_columns as f64
        },
        priority_counts,
        priority_percentages,
        overdue,
        overdue_high_priority,
        due_today,
        due_next_seven_days,
        completed_cards,
        active_cards: total_cards - completed_cards,
        columns: column_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn setup() -> (Board, Vec<Column>) {
        let board = Board::new("Test".to_string(), None);
        let columns = ["Backlog", "In Progress", "Done"]
            .iter()
            .enumerate()
            .map(|(i, title)| Column::new(board.id, title.to_string(), i as i32))
            .collect();
        (board, columns)
    }

    fn card_with_priority(column: &Column, priority: CardPriority, position: i32) -> Card {
        let mut card = Card::new(column.id, format!("card-{}", position), position);
        card.priority = priority;
        card
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn empty_board_yields_zeroes() {
        let (board, columns) = setup();
        let metrics = compute_board_metrics(&columns, &[], board.id, today());
        assert_eq!(metrics.total_cards, 0);
        assert_eq!(metrics.total_columns, 3);
        assert_eq!(metrics.average_cards_per_column, 0.0);
        assert_eq!(metrics.priority_percentages, PriorityPercentages::default());
        assert_eq!(metrics.completed_cards, 0);
        assert_eq!(metrics.active_cards, 0);
    }

    #[test]
    fn no_columns_means_zero_average() {
        let board = Board::new("Empty".to_string(), None);
        let metrics = compute_board_metrics(&[], &[], board.id, today());
        assert_eq!(metrics.total_columns, 0);
        assert_eq!(metrics.average_cards_per_column, 0.0);
        assert!(metrics.columns.is_empty());
    }

    #[test]
    fn priority_counts_and_percentages() {
        let (board, columns) = setup();
        use CardPriority::*;
        let cards: Vec<Card> = [High, High, Medium, Medium, Low]
            .iter()
            .enumerate()
            .map(|(i, &p)| card_with_priority(&columns[0], p, i as i32))
            .collect();

        let metrics = compute_board_metrics(&columns, &cards, board.id, today());
        assert_eq!(metrics.total_cards, 5);
        assert_eq!(
            metrics.priority_counts,
            PriorityCounts { high: 2, medium: 2, low: 1 }
        );
        assert_eq!(metrics.priority_percentages.high, 40.0);
        assert_eq!(metrics.priority_percentages.medium, 40.0);
        assert_eq!(metrics.priority_percentages.low, 20.0);
    }

    #[test]
    fn due_date_bucketing() {
        let (board, columns) = setup();
        let today = today();
        let yesterday = today.pred_opt().unwrap();
        let in_six_days = today.checked_add_days(Days::new(6)).unwrap();
        let in_seven_days = today.checked_add_days(Days::new(7)).unwrap();

        let mut overdue_high = card_with_priority(&columns[0], CardPriority::High, 0);
        overdue_high.due_date = Some(yesterday);
        let mut overdue_low = card_with_priority(&columns[0], CardPriority::Low, 1);
        overdue_low.due_date = Some(yesterday);
        let mut due_today_card = card_with_priority(&columns[0], CardPriority::Medium, 2);
        due_today_card.due_date = Some(today);
        let mut due_soon = card_with_priority(&columns[0], CardPriority::Medium, 3);
        due_soon.due_date = Some(in_six_days);
        let mut due_later = card_with_priority(&columns[0], CardPriority::Medium, 4);
        due_later.due_date = Some(in_seven_days);
        let undated = card_with_priority(&columns[0], CardPriority::Medium, 5);

        let cards = vec![overdue_high, overdue_low, due_today_card, due_soon, due_later, undated];
        let metrics = compute_board_metrics(&columns, &cards, board.id, today);

        assert_eq!(metrics.overdue, 2);
        assert_eq!(metrics.overdue_high_priority, 1);
        assert_eq!(metrics.due_today, 1);
        // Today and the six-days-out card; the boundary at +7 is excluded.
        assert_eq!(metrics.due_next_seven_days, 2);
    }

    #[test]
    fn completed_cards_use_done_column() {
        let (board, columns) = setup();
        let cards = vec![
            card_with_priority(&columns[0], CardPriority::Medium, 0),
            card_with_priority(&columns[2], CardPriority::Medium, 0),
            card_with_priority(&columns[2], CardPriority::Medium, 1),
        ];
        let metrics = compute_board_metrics(&columns, &cards, board.id, today());
        assert_eq!(metrics.completed_cards, 2);
        assert_eq!(metrics.active_cards, 1);
    }

    #[test]
    fn archived_cards_are_invisible() {
        let (board, columns) = setup();
        let mut archived = card_with_priority(&columns[0], CardPriority::High, 0);
        archived.is_archived = true;
        archived.due_date = Some(today().pred_opt().unwrap());
        let live = card_with_priority(&columns[0], CardPriority::Low, 1);

        let metrics = compute_board_metrics(&columns, &[archived, live], board.id, today());
        assert_eq!(metrics.total_cards, 1);
        assert_eq!(metrics.priority_counts.high, 0);
        assert_eq!(metrics.overdue, 0);
        assert_eq!(metrics.columns[0].card_count, 1);
    }

    #[test]
    fn per_column_breakdown_percentages() {
        let (board, columns) = setup();
        let cards = vec![
            card_with_priority(&columns[0], CardPriority::Medium, 0),
            card_with_priority(&columns[0], CardPriority::Medium, 1),
            card_with_priority(&columns[0], CardPriority::Medium, 2),
            card_with_priority(&columns[1], CardPriority::Medium, 0),
        ];
        let metrics = compute_board_metrics(&columns, &cards, board.id, today());
        assert_eq!(metrics.columns.len(), 3);
        assert_eq!(metrics.columns[0].card_count, 3);
        assert_eq!(metrics.columns[0].percent_of_total, 75.0);
        assert_eq!(metrics.columns[1].percent_of_total, 25.0);
        assert_eq!(metrics.columns[2].card_count, 0);
        assert_eq!(metrics.average_cards_per_column, 4.0 / 3.0);
    }

    #[test]
    fn other_boards_do_not_leak_in() {
        let (board, mut columns) = setup();
        let other_board = Board::new("Other".to_string(), None);
        let other_column = Column::new(other_board.id, "Done".to_string(), 0);
        let foreign_card = card_with_priority(&other_column, CardPriority::High, 0);
        columns.push(other_column);

        let metrics = compute_board_metrics(&columns, &[foreign_card], board.id, today());
        assert_eq!(metrics.total_cards, 0);
        assert_eq!(metrics.total_columns, 3);
    }
}
