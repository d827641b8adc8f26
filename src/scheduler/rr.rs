use std::collections::VecDeque;

use thiserror::Error;

use super::Scheduler;
use crate::core::state::{JobId, Ticks};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("round-robin quantum must be a positive number of ticks")]
pub struct InvalidQuantum;

// Expired jobs re-enter at the tail, behind anything admitted earlier in the
// same tick.
#[derive(Debug)]
pub struct RrScheduler {
    queue: VecDeque<JobId>,
    quantum: Ticks,
}

impl RrScheduler {
    pub fn new(quantum: Ticks) -> Result<Self, InvalidQuantum> {
        if quantum == 0 {
            return Err(InvalidQuantum);
        }
        Ok(Self {
            queue: VecDeque::new(),
            quantum,
        })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RrScheduler {
    const NAME: &'static str = "round-robin";

    fn enqueue(&mut self, job: JobId, _remaining: Ticks) {
        self.queue.push_back(job);
    }

    fn dispatch(&mut self) -> Option<JobId> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn slice(&self) -> Option<Ticks> {
        Some(self.quantum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_quantum() {
        assert_eq!(RrScheduler::new(0).unwrap_err(), InvalidQuantum);
    }

    #[test]
    fn exposes_quantum_as_slice() {
        let scheduler = RrScheduler::new(4).unwrap();
        assert_eq!(scheduler.slice(), Some(4));
        assert_eq!(scheduler.quantum(), 4);
    }

    #[test]
    fn requeue_goes_to_the_tail() {
        let mut scheduler = RrScheduler::new(2).unwrap();
        scheduler.enqueue(0, 8);
        scheduler.enqueue(1, 3);

        let first = scheduler.dispatch().unwrap();
        assert_eq!(first, 0);
        scheduler.enqueue(first, 6);

        assert_eq!(scheduler.dispatch(), Some(1));
        assert_eq!(scheduler.dispatch(), Some(0));
    }
}
