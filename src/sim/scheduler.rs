//! Cancellable delayed execution for spawns and wave scheduling
//!
//! Delays are wall-clock seconds on the match clock, not frame counts. The
//! queue is owned by [`GameState`](super::GameState) and drained inside
//! `tick`, so no task can outlive the state it mutates; ending the match
//! clears the queue and pending tasks simply never fire.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::spawn::ForceHazard;

/// A unit of delayed work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Delayed sub-spawn of a chained wave
    SpawnEntity { force: ForceHazard },
    /// Pull the next kind off the schedule and run it
    NextWave,
}

#[derive(Debug, Clone)]
struct Entry {
    fire_at: f64,
    /// Insertion order, breaks ties between equal fire times
    seq: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the earliest entry on top
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of delayed tasks keyed by fire time
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to fire once the match clock reaches `fire_at`
    pub fn schedule(&mut self, fire_at: f64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { fire_at, seq, task });
    }

    /// Pop the earliest task due at or before `now`, if any
    pub fn pop_due(&mut self, now: f64) -> Option<Task> {
        if self.heap.peek()?.fire_at <= now {
            self.heap.pop().map(|e| e.task)
        } else {
            None
        }
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Fire time of the next pending task
    pub fn next_fire_at(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.fire_at)
    }
}
