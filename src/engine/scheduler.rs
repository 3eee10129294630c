//! Deterministic timer queue.
//!
//! Stands in for `setTimeout`/`setInterval`: tasks are due at an `Instant`
//! and are handed back in due order (ties in insertion order) when the
//! caller polls with the current time. Intervals are modelled by the
//! handler re-arming its task. Nothing is ever cancelled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

struct Entry<T> {
    due: Instant,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct Scheduler<T> {
    queue: BinaryHeap<Entry<T>>,
    seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            seq: 0,
        }
    }

    pub fn schedule_at(&mut self, due: Instant, task: T) {
        self.seq += 1;
        self.queue.push(Entry {
            due,
            seq: self.seq,
            task,
        });
    }

    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: T) {
        self.schedule_at(now + delay, task);
    }

    /// Remove and return the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, T)> {
        if self.queue.peek()?.due > now {
            return None;
        }
        self.queue.pop().map(|e| (e.due, e.task))
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.peek().map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_then_insertion_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_after(t0, Duration::from_millis(200), "late");
        s.schedule_after(t0, Duration::from_millis(100), "first");
        s.schedule_after(t0, Duration::from_millis(100), "second");

        assert!(s.pop_due(t0).is_none());
        let now = t0 + Duration::from_millis(250);
        let order: Vec<_> = std::iter::from_fn(|| s.pop_due(now).map(|(_, t)| t)).collect();
        assert_eq!(order, vec!["first", "second", "late"]);
        assert!(s.is_empty());
    }

    #[test]
    fn not_yet_due_stays_queued() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule_after(t0, Duration::from_millis(3000), ());
        assert!(s.pop_due(t0 + Duration::from_millis(2999)).is_none());
        assert_eq!(s.next_due(), Some(t0 + Duration::from_millis(3000)));
        assert!(s.pop_due(t0 + Duration::from_millis(3000)).is_some());
    }
}
