pub mod fcfs;
pub mod rr;
pub mod srtf;

use crate::core::state::{JobId, Ticks};
pub use fcfs::FcfsScheduler;
pub use rr::{InvalidQuantum, RrScheduler};
pub use srtf::SrtfScheduler;

pub trait Scheduler {
    const NAME: &'static str;

    // `remaining` is the job's remaining time at enqueue time; policies that
    // order the pool by it key on this value.
    fn enqueue(&mut self, job: JobId, remaining: Ticks);

    fn dispatch(&mut self) -> Option<JobId>;

    fn is_empty(&self) -> bool;

    // Contiguous ticks a job may hold the CPU; None means unbounded.
    fn slice(&self) -> Option<Ticks> {
        None
    }

    fn should_preempt(&self, _running_remaining: Ticks) -> bool {
        false
    }
}
