use keyed_priority_queue::KeyedPriorityQueue;

use super::Scheduler;
use crate::core::state::{JobId, Ticks};

// KeyedPriorityQueue is a max-heap, so Rank's Ord is flipped to surface the
// smallest remaining time first. `seq` is the admission sequence number:
// jobs with equal remaining time run in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Rank {
    remaining: Ticks,
    seq: u64,
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.remaining, other.seq).cmp(&(self.remaining, self.seq))
    }
}

#[derive(Debug)]
pub struct SrtfScheduler {
    pool: KeyedPriorityQueue<JobId, Rank>,
    next_seq: u64,
}

impl SrtfScheduler {
    pub fn new() -> Self {
        Self {
            pool: KeyedPriorityQueue::new(),
            next_seq: 0,
        }
    }
}

impl Default for SrtfScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "SRTF";

    fn enqueue(&mut self, job: JobId, remaining: Ticks) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pool.push(job, Rank { remaining, seq });
    }

    fn dispatch(&mut self) -> Option<JobId> {
        self.pool.pop().map(|(job, _)| job)
    }

    fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    fn should_preempt(&self, running_remaining: Ticks) -> bool {
        match self.pool.peek() {
            Some((_, rank)) => rank.remaining < running_remaining,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_shortest_remaining_first() {
        let mut scheduler = SrtfScheduler::new();
        scheduler.enqueue(0, 9);
        scheduler.enqueue(1, 2);
        scheduler.enqueue(2, 5);

        assert_eq!(scheduler.dispatch(), Some(1));
        assert_eq!(scheduler.dispatch(), Some(2));
        assert_eq!(scheduler.dispatch(), Some(0));
    }

    #[test]
    fn breaks_ties_by_insertion_order() {
        let mut scheduler = SrtfScheduler::new();
        scheduler.enqueue(3, 4);
        scheduler.enqueue(1, 4);
        scheduler.enqueue(2, 4);

        assert_eq!(scheduler.dispatch(), Some(3));
        assert_eq!(scheduler.dispatch(), Some(1));
        assert_eq!(scheduler.dispatch(), Some(2));
    }

    #[test]
    fn preempts_only_on_strictly_smaller_remaining() {
        let mut scheduler = SrtfScheduler::new();
        assert!(!scheduler.should_preempt(3));

        scheduler.enqueue(0, 3);
        assert!(!scheduler.should_preempt(3));
        assert!(scheduler.should_preempt(4));
    }
}
