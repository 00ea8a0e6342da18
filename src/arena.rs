// Shared constrained-greedy assignment over per-position sorted lists.
//
// Both the FLEX/SUPERFLEX starter allocation and the lineup optimizer walk
// pre-sorted per-position lists with a cursor each, repeatedly taking the
// best "next" candidate among an eligible position set. This module holds
// that routine so the two call sites cannot drift apart.

use std::collections::HashMap;

use crate::player::Position;

/// Per-position sorted lists with consumption cursors.
///
/// Lists must be pre-sorted best-first by the caller; the arena itself is
/// ordering-agnostic and only ever compares list heads. Candidate iteration
/// always follows the caller-supplied priority slice, never map order, so
/// results are reproducible.
#[derive(Debug)]
pub struct PositionArena<T> {
    lists: HashMap<Position, Vec<T>>,
    cursors: HashMap<Position, usize>,
}

impl<T: Clone> PositionArena<T> {
    /// Build an arena from per-position lists, all cursors at the head.
    pub fn new(lists: HashMap<Position, Vec<T>>) -> Self {
        let cursors = lists.keys().map(|&pos| (pos, 0)).collect();
        PositionArena { lists, cursors }
    }

    /// Move a position's cursor to `index`, marking everything before it as
    /// already consumed. An index past the end simply exhausts the position.
    pub fn set_cursor(&mut self, pos: Position, index: usize) {
        self.cursors.insert(pos, index);
    }

    /// How many entries have been consumed from a position's list.
    pub fn taken(&self, pos: Position) -> usize {
        self.cursors.get(&pos).copied().unwrap_or(0)
    }

    /// The next unconsumed entry for a position, if any.
    pub fn peek(&self, pos: Position) -> Option<&T> {
        let cursor = self.cursors.get(&pos).copied().unwrap_or(0);
        self.lists.get(&pos).and_then(|list| list.get(cursor))
    }

    /// Consume and return the next entry for a position.
    pub fn take(&mut self, pos: Position) -> Option<T> {
        let value = self.peek(pos)?.clone();
        *self.cursors.entry(pos).or_insert(0) += 1;
        Some(value)
    }

    /// Consume the best next entry among `candidates`.
    ///
    /// `strictly_better(a, b)` returns true when `a` should win over `b`.
    /// Because the comparison is strict, ties go to the earliest candidate
    /// in the slice — the fixed priority order the engine documents.
    /// Exhausted positions are not candidates. Returns None when every
    /// candidate is exhausted.
    pub fn take_best(
        &mut self,
        candidates: &[Position],
        strictly_better: impl Fn(&T, &T) -> bool,
    ) -> Option<(Position, T)> {
        let mut best: Option<(Position, T)> = None;
        for &pos in candidates {
            let Some(next) = self.peek(pos) else {
                continue;
            };
            let wins = match &best {
                Some((_, current)) => strictly_better(next, current),
                None => true,
            };
            if wins {
                best = Some((pos, next.clone()));
            }
        }
        let (pos, _) = best?;
        self.take(pos).map(|value| (pos, value))
    }
}
