use crate::core::event::{Event, EventKind};

// Index into SimState.jobs
pub type JobId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running { job: JobId, quantum_elapsed: Ticks },
}

#[derive(Debug, Clone)]
pub struct JobState {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub exit_time: Option<Ticks>,
}

impl JobState {
    pub fn new(id: JobId, burst_time: Ticks, arrival_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            start_time: None,
            exit_time: None,
        }
    }
}

#[derive(Debug)]
pub struct SimState {
    pub now: Ticks,
    pub phase: Phase,
    pub jobs: Vec<JobState>,
    pub completed: Vec<JobId>,
    pub events: Vec<Event>,
    pub busy_ticks: Ticks,
}

impl SimState {
    pub fn new(jobs: Vec<JobState>) -> Self {
        for (index, job) in jobs.iter().enumerate() {
            debug_assert_eq!(job.id, index, "JobId must match Vec index");
        }

        Self {
            now: 0,
            phase: Phase::Idle,
            jobs,
            completed: Vec::new(),
            events: Vec::new(),
            busy_ticks: 0,
        }
    }

    pub fn job(&self, job_id: JobId) -> &JobState {
        &self.jobs[job_id]
    }

    pub fn job_mut(&mut self, job_id: JobId) -> &mut JobState {
        &mut self.jobs[job_id]
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn record(&mut self, job: JobId, kind: EventKind) {
        self.events.push(Event {
            tick: self.now,
            job,
            kind,
        });
    }

    pub fn mark_started(&mut self, job_id: JobId) {
        let now = self.now;
        let job = self.job_mut(job_id);
        debug_assert!(
            job.exit_time.is_none(),
            "Job {job_id} dispatched after completion"
        );
        // First dispatch only; a preempted job keeps its original start
        if job.start_time.is_none() {
            job.start_time = Some(now);
        }
    }

    pub fn mark_completed(&mut self, job_id: JobId) {
        let now = self.now;
        let job = self.job_mut(job_id);
        debug_assert_eq!(job.remaining_time, 0, "Job {job_id} completed with work left");
        debug_assert!(job.exit_time.is_none(), "Job {job_id} completed twice");
        job.exit_time = Some(now);
        self.completed.push(job_id);
        self.record(job_id, EventKind::Terminated);
    }
}
