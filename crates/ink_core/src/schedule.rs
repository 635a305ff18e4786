//! Cooperative timer queue
//!
//! One `TimerQueue` per simulation world, drained by the tick loop. All
//! deferred work - refire cadence, cooldown notifications, deferred
//! destruction - goes through here, so there is exactly one place where
//! "cancel before reschedule" has to hold. Cancellation is
//! removal-by-handle; the heap entry is left behind and skipped on pop.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Identifies a pending timer for cancellation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct HeapEntry {
    due: f64,
    id: TimerId,
}

// Min-heap order by due time; ties broken by insertion order via the id.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// Priority queue of due times carrying an event payload
pub struct TimerQueue<E> {
    heap: BinaryHeap<HeapEntry>,
    pending: HashMap<u64, (f64, E)>,
    next_id: u64,
}

impl<E> TimerQueue<E> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedule an event at an absolute due time
    pub fn schedule(&mut self, due: f64, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id.0, (due, event));
        self.heap.push(HeapEntry { due, id });
        id
    }

    /// Cancel a pending timer
    ///
    /// Returns false if the timer already fired or was canceled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id.0).is_some()
    }

    /// Check whether a timer is still pending
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id.0)
    }

    /// Pop the next event due at or before `now`, earliest first
    pub fn pop_due(&mut self, now: f64) -> Option<(TimerId, E)> {
        while let Some(top) = self.heap.peek() {
            let id = top.id;
            if !self.pending.contains_key(&id.0) {
                // Canceled; drop the stale heap entry
                self.heap.pop();
                continue;
            }
            if top.due > now {
                return None;
            }
            self.heap.pop();
            if let Some((_, event)) = self.pending.remove(&id.0) {
                return Some((id, event));
            }
        }
        None
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<f64> {
        self.pending
            .values()
            .map(|(due, _)| *due)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(2.0, "late");
        q.schedule(1.0, "early");

        assert_eq!(q.pop_due(0.5), None);
        assert_eq!(q.pop_due(2.5).map(|(_, e)| e), Some("early"));
        assert_eq!(q.pop_due(2.5).map(|(_, e)| e), Some("late"));
        assert_eq!(q.pop_due(2.5), None);
    }

    #[test]
    fn test_cancel_removes_event() {
        let mut q = TimerQueue::new();
        let keep = q.schedule(1.0, "keep");
        let drop = q.schedule(1.0, "drop");

        assert!(q.cancel(drop));
        assert!(!q.cancel(drop));
        assert!(q.is_pending(keep));

        assert_eq!(q.pop_due(2.0).map(|(_, e)| e), Some("keep"));
        assert_eq!(q.pop_due(2.0), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_same_due_preserves_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(1.0, 1);
        q.schedule(1.0, 2);
        q.schedule(1.0, 3);

        let order: Vec<i32> = std::iter::from_fn(|| q.pop_due(1.0).map(|(_, e)| e)).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_next_due() {
        let mut q = TimerQueue::new();
        assert_eq!(q.next_due(), None);
        q.schedule(3.0, ());
        let id = q.schedule(1.0, ());
        assert_eq!(q.next_due(), Some(1.0));
        q.cancel(id);
        assert_eq!(q.next_due(), Some(3.0));
    }
}
