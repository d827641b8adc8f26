use super::state::{Phase, SimState};

#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, state: &SimState) {
        self.step += 1;
        debug_assert_eq!(self.step, state.now, "Clock must advance exactly 1 per tick");

        if let Phase::Running { job, quantum_elapsed } = state.phase {
            let current = state.job(job);
            debug_assert!(
                current.start_time.is_some(),
                "Running job {job} missing start time"
            );
            debug_assert!(
                current.exit_time.is_none(),
                "Completed job {job} still on the CPU"
            );
            debug_assert!(
                current.remaining_time > 0,
                "Running job {job} has no work left"
            );
            debug_assert!(
                quantum_elapsed > 0,
                "Job {job} on the CPU without having executed"
            );
        }

        let mut worked = 0;
        for job in &state.jobs {
            debug_assert!(
                job.remaining_time <= job.burst_time,
                "Job {} remaining time exceeds its burst",
                job.id
            );
            worked += job.burst_time - job.remaining_time;

            if let Some(exit) = job.exit_time {
                debug_assert_eq!(job.remaining_time, 0, "Retired job {} has work left", job.id);
                debug_assert!(
                    exit >= job.arrival_time + job.burst_time,
                    "Job {} finished before its earliest possible completion",
                    job.id
                );
            }
        }
        debug_assert_eq!(worked, state.busy_ticks, "Work accounting out of balance");

        debug_assert!(
            state
                .completed
                .windows(2)
                .all(|pair| state.job(pair[0]).exit_time <= state.job(pair[1]).exit_time),
            "Completion order not monotone in exit time"
        );
    }
}
