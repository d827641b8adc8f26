use log::{debug, trace};

use super::{
    event::EventKind,
    observer::Observer,
    state::{JobId, JobState, Phase, SimState},
};
use crate::scheduler::Scheduler;

pub struct Engine<S: Scheduler> {
    pub state: SimState,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> Engine<S> {
    pub fn new(jobs: Vec<JobState>, scheduler: S) -> Self {
        Self {
            state: SimState::new(jobs),
            scheduler,
            observer: Observer::new(),
        }
    }

    // Ready pool drained and nothing on the CPU
    pub fn idle(&self) -> bool {
        self.state.phase == Phase::Idle && self.scheduler.is_empty()
    }

    pub fn admit(&mut self, job: JobId) {
        let remaining = self.state.job(job).remaining_time;
        debug_assert!(
            self.state.job(job).exit_time.is_none(),
            "Job {job} admitted after completion"
        );
        trace!("t={} admit job {}", self.state.now, job);
        self.scheduler.enqueue(job, remaining);
    }

    // Advance the simulation by one tick. Returns the job that completed
    // during this tick, if any.
    pub fn tick(&mut self) -> Option<JobId> {
        self.reconsider_current();
        if self.state.phase == Phase::Idle {
            self.dispatch_next();
        }
        let completed = self.run_current();
        self.observer.observe(&self.state);
        completed
    }

    // Same-tick decision on the running job, taken after admission and
    // before the tick's unit of work: quantum expiry for time-sliced
    // policies, remaining-time preemption for SRTF.
    fn reconsider_current(&mut self) {
        let Phase::Running { job, quantum_elapsed } = self.state.phase else {
            return;
        };
        let remaining = self.state.job(job).remaining_time;

        if self.scheduler.slice() == Some(quantum_elapsed) {
            debug!("t={} job {} quantum expired", self.state.now, job);
            self.state.record(job, EventKind::QuantumExpired { remaining });
            self.scheduler.enqueue(job, remaining);
            self.state.phase = Phase::Idle;
        } else if self.scheduler.should_preempt(remaining) {
            debug!("t={} job {} preempted", self.state.now, job);
            self.state.record(job, EventKind::Preempted { remaining });
            self.scheduler.enqueue(job, remaining);
            self.state.phase = Phase::Idle;
        }
    }

    fn dispatch_next(&mut self) {
        if let Some(job) = self.scheduler.dispatch() {
            trace!("t={} dispatch job {}", self.state.now, job);
            self.state.mark_started(job);
            self.state.phase = Phase::Running {
                job,
                quantum_elapsed: 0,
            };
        }
    }

    // Execute one tick of work on the current job, then advance the clock.
    fn run_current(&mut self) -> Option<JobId> {
        let Phase::Running { job, quantum_elapsed } = self.state.phase else {
            self.state.advance_time(1);
            return None;
        };

        {
            let current = self.state.job_mut(job);
            debug_assert!(current.remaining_time > 0, "Job {job} running with no work left");
            current.remaining_time -= 1;
        }
        self.state.busy_ticks += 1;
        self.state.phase = Phase::Running {
            job,
            quantum_elapsed: quantum_elapsed + 1,
        };
        self.state.advance_time(1);

        if self.state.job(job).remaining_time == 0 {
            debug!("t={} job {} terminated", self.state.now, job);
            self.state.mark_completed(job);
            self.state.phase = Phase::Idle;
            return Some(job);
        }

        None
    }
}
