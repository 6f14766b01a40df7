//! Sibling ordering.
//!
//! Positions are integers whose only contract is relative order within a
//! sibling scope: columns of a board, live cards of a column, checklists
//! of a card, items of a checklist. Every function here takes a scope
//! predicate so the same machinery serves all four scopes. Callers must
//! hold the scope exclusively for the duration of a renumber (the engine's
//! write lock provides this).

use crate::{
    card::Card,
    checklist::{Checklist, ChecklistItem},
    column::Column,
};

/// An entity ranked among its siblings.
pub trait Positioned {
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32);
}

// Renumbering writes positions directly; it is bookkeeping, not an edit,
// so sibling `updated_at` stamps stay untouched.
impl Positioned for Column {
    fn position(&self) -> i32 {
        self.position
    }
    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

impl Positioned for Card {
    fn position(&self) -> i32 {
        self.position
    }
    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

impl Positioned for Checklist {
    fn position(&self) -> i32 {
        self.position
    }
    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

impl Positioned for ChecklistItem {
    fn position(&self) -> i32 {
        self.position
    }
    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// References to the scope's members, sorted by position.
pub fn sorted_by_position<T, F>(items: &[T], in_scope: F) -> Vec<&T>
where
    T: Positioned,
    F: Fn(&T) -> bool,
{
    let mut members: Vec<&T> = items.iter().filter(|item| in_scope(item)).collect();
    members.sort_by_key(|item| item.position());
    members
}

/// Position for an append: one past the current maximum, 0 for an empty
/// scope. Max-based rather than count-based so a scope that temporarily
/// carries gaps still appends past its last member.
pub fn next_append_position<T, F>(items: &[T], in_scope: F) -> i32
where
    T: Positioned,
    F: Fn(&T) -> bool,
{
    items
        .iter()
        .filter(|item| in_scope(item))
        .map(|item| item.position())
        .max()
        .map_or(0, |max| max + 1)
}

/// Renumber the scope to a dense 0..N-1 run, preserving relative order.
pub fn compact_positions<T, F>(items: &mut [T], in_scope: F)
where
    T: Positioned,
    F: Fn(&T) -> bool,
{
    let mut indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| in_scope(item))
        .map(|(i, _)| i)
        .collect();

    indices.sort_by_key(|&i| items[i].position());

    for (new_pos, &idx) in indices.iter().enumerate() {
        items[idx].set_position(new_pos as i32);
    }
}

/// Make room at `index` in an already-dense scope: members at or past the
/// index shift up by one. An index past the end is clamped to an append.
/// Returns the position the inserted entity should take.
pub fn open_slot<T, F>(items: &mut [T], in_scope: F, index: usize) -> i32
where
    T: Positioned,
    F: Fn(&T) -> bool,
{
    let size = items.iter().filter(|item| in_scope(item)).count();
    let index = index.min(size) as i32;

    for item in items.iter_mut().filter(|item| in_scope(item)) {
        if item.position() >= index {
            item.set_position(item.position() + 1);
        }
    }
    index
}

/// True when the scope's positions form exactly 0..N-1.
pub fn is_dense<T, F>(items: &[T], in_scope: F) -> bool
where
    T: Positioned,
    F: Fn(&T) -> bool,
{
    let mut positions: Vec<i32> = items
        .iter()
        .filter(|item| in_scope(item))
        .map(|item| item.position())
        .collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(i, &pos)| pos == i as i32)
}
