use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::core::state::{JobState, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub id: String,
    pub burst_time: Ticks,
    pub arrival_time: Ticks,
}

impl JobSpec {
    pub fn new(id: impl Into<String>, burst_time: Ticks, arrival_time: Ticks) -> Self {
        Self {
            id: id.into(),
            burst_time,
            arrival_time,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkloadError {
    #[error("workload contains no jobs")]
    Empty,
    #[error("duplicate job id {0:?}")]
    DuplicateId(String),
    #[error("job {0:?} is listed after a job with a later arrival time")]
    UnsortedArrival(String),
    #[error("job {0:?} has a zero-tick burst")]
    ZeroBurst(String),
}

// Immutable template of a run. Each simulation run instantiates its own
// mutable job states from it, so one algorithm's mutations never reach
// another's.
#[derive(Debug, Clone)]
pub struct Workload {
    jobs: Vec<JobSpec>,
}

impl Workload {
    pub fn new(jobs: Vec<JobSpec>) -> Result<Self, WorkloadError> {
        if jobs.is_empty() {
            return Err(WorkloadError::Empty);
        }

        let mut seen = FxHashSet::default();
        let mut last_arrival = 0;
        for job in &jobs {
            if job.burst_time == 0 {
                return Err(WorkloadError::ZeroBurst(job.id.clone()));
            }
            if !seen.insert(job.id.as_str()) {
                return Err(WorkloadError::DuplicateId(job.id.clone()));
            }
            if job.arrival_time < last_arrival {
                return Err(WorkloadError::UnsortedArrival(job.id.clone()));
            }
            last_arrival = job.arrival_time;
        }

        Ok(Self { jobs })
    }

    pub fn jobs(&self) -> &[JobSpec] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub(crate) fn instantiate(&self) -> Vec<JobState> {
        self.jobs
            .iter()
            .enumerate()
            .map(|(index, job)| JobState::new(index, job.burst_time, job.arrival_time))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub id: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub start_time: Ticks,
    pub exit_time: Ticks,
}

impl CompletedJob {
    pub fn turnaround_time(&self) -> Ticks {
        self.exit_time - self.arrival_time
    }

    pub fn waiting_time(&self) -> Ticks {
        self.turnaround_time() - self.burst_time
    }
}
