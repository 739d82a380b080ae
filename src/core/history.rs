//! Execution history of a running machine.
//!
//! Two views are kept: a stack of visited states whose top is always the
//! current state (used to rewind while debugging), and a journal of every
//! transition with the tick and wall-clock time it happened at.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of stack entries kept for rewinding.
pub const DEFAULT_STACK_CAPACITY: usize = 1024;

/// Default number of journal records kept.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 256;

/// Record of a single state transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    /// Machine tick on which the transition happened
    pub tick: u64,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Bounded rewind stack plus transition journal.
///
/// When either view is full the oldest entry is dropped.
#[derive(Clone, Debug)]
pub struct ExecutionHistory {
    stack: VecDeque<StateId>,
    journal: VecDeque<TransitionRecord>,
    stack_capacity: usize,
    journal_capacity: usize,
}

impl Default for ExecutionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_CAPACITY, DEFAULT_JOURNAL_CAPACITY)
    }
}

impl ExecutionHistory {
    pub fn new(stack_capacity: usize, journal_capacity: usize) -> Self {
        Self {
            stack: VecDeque::new(),
            journal: VecDeque::new(),
            stack_capacity: stack_capacity.max(1),
            journal_capacity,
        }
    }

    /// Forget the stack and start again from `first`. The journal is kept.
    pub fn restart(&mut self, first: StateId) {
        self.stack.clear();
        self.stack.push_back(first);
    }

    /// Record a move from `from` to `to`.
    pub fn record(&mut self, from: StateId, to: StateId, tick: u64) {
        if self.stack.len() == self.stack_capacity {
            self.stack.pop_front();
        }
        self.stack.push_back(to);

        if self.journal_capacity == 0 {
            return;
        }
        if self.journal.len() == self.journal_capacity {
            self.journal.pop_front();
        }
        self.journal.push_back(TransitionRecord {
            from,
            to,
            tick,
            timestamp: Utc::now(),
        });
    }

    /// Top of the stack.
    pub fn current(&self) -> Option<StateId> {
        self.stack.back().copied()
    }

    /// Drop the current entry and return the one before it.
    ///
    /// Returns `None`, leaving the stack alone, when there is nothing to go
    /// back to.
    pub fn step_back(&mut self) -> Option<StateId> {
        if self.stack.len() < 2 {
            return None;
        }
        self.stack.pop_back();
        self.current()
    }

    /// Rewind stack, oldest first.
    pub fn stack(&self) -> impl Iterator<Item = StateId> + '_ {
        self.stack.iter().copied()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> + '_ {
        self.journal.iter()
    }

    /// States traversed according to the journal: the first record's
    /// source, then each target in order.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::new();
        if let Some(first) = self.journal.front() {
            path.push(first.from);
        }
        path.extend(self.journal.iter().map(|record| record.to));
        path
    }

    /// Wall-clock time between the first and last journaled transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.journal.front()?, self.journal.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> StateId {
        StateId::detached(n)
    }

    #[test]
    fn new_history_is_empty() {
        let history = ExecutionHistory::default();
        assert_eq!(history.depth(), 0);
        assert!(history.current().is_none());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_pushes_and_journals() {
        let mut history = ExecutionHistory::default();
        history.restart(id(0));
        history.record(id(0), id(1), 1);
        history.record(id(1), id(2), 2);

        assert_eq!(history.current(), Some(id(2)));
        assert_eq!(history.stack().collect::<Vec<_>>(), vec![id(0), id(1), id(2)]);
        assert_eq!(history.path(), vec![id(0), id(1), id(2)]);

        let ticks: Vec<u64> = history.records().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![1, 2]);
        assert!(history.duration().is_some());
    }

    #[test]
    fn step_back_keeps_top_equal_to_current() {
        let mut history = ExecutionHistory::default();
        history.restart(id(0));
        history.record(id(0), id(1), 1);
        history.record(id(1), id(2), 2);

        assert_eq!(history.step_back(), Some(id(1)));
        assert_eq!(history.current(), Some(id(1)));
        assert_eq!(history.step_back(), Some(id(0)));
        assert_eq!(history.step_back(), None);
        assert_eq!(history.current(), Some(id(0)));
    }

    #[test]
    fn restart_keeps_the_journal() {
        let mut history = ExecutionHistory::default();
        history.restart(id(0));
        history.record(id(0), id(1), 1);

        history.restart(id(0));

        assert_eq!(history.depth(), 1);
        assert_eq!(history.records().count(), 1);
    }

    #[test]
    fn capacities_drop_oldest_entries() {
        let mut history = ExecutionHistory::new(2, 1);
        history.restart(id(0));
        history.record(id(0), id(1), 1);
        history.record(id(1), id(2), 2);

        assert_eq!(history.stack().collect::<Vec<_>>(), vec![id(1), id(2)]);
        let records: Vec<_> = history.records().cloned().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to, id(2));
    }

    #[test]
    fn zero_journal_capacity_disables_the_journal() {
        let mut history = ExecutionHistory::new(4, 0);
        history.restart(id(0));
        history.record(id(0), id(1), 1);

        assert_eq!(history.records().count(), 0);
        assert_eq!(history.current(), Some(id(1)));
    }

    #[test]
    fn records_serialize() {
        let record = TransitionRecord {
            from: id(0),
            to: id(1),
            tick: 3,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: TransitionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
