use log::info;

use super::job::{CompletedJob, Workload};
use crate::{
    core::{
        driver::Engine,
        event::EventKind,
        state::{JobId, Ticks},
    },
    scheduler::{FcfsScheduler, InvalidQuantum, RrScheduler, Scheduler, SrtfScheduler},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fcfs,
    RoundRobin { quantum: Ticks },
    Srtf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub tick: Ticks,
    pub id: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub algorithm: &'static str,
    pub completed: Vec<CompletedJob>,
    pub events: Vec<TraceEvent>,
}

pub struct Sim<S: Scheduler> {
    pub engine: Engine<S>,
    ids: Vec<String>,
    // Next not-yet-admitted job; arrivals are contiguous since the workload
    // is arrival-ordered
    cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(workload: &Workload, scheduler: S) -> Self {
        Self {
            engine: Engine::new(workload.instantiate(), scheduler),
            ids: workload.jobs().iter().map(|job| job.id.clone()).collect(),
            cursor: 0,
        }
    }

    // Single termination predicate: backlog drained, ready pool empty, CPU
    // idle. Checked before admission each tick.
    pub fn done(&self) -> bool {
        self.cursor == self.ids.len() && self.engine.idle()
    }

    pub fn step(&mut self) -> Option<JobId> {
        self.admit_arrivals();
        self.engine.tick()
    }

    fn admit_arrivals(&mut self) {
        let now = self.engine.state.now;
        while self.cursor < self.ids.len()
            && self.engine.state.job(self.cursor).arrival_time <= now
        {
            self.engine.admit(self.cursor);
            self.cursor += 1;
        }
    }

    pub fn into_report(self) -> RunReport {
        let state = self.engine.state;

        let completed = state
            .completed
            .iter()
            .map(|&job_id| {
                let job = &state.jobs[job_id];
                CompletedJob {
                    id: self.ids[job_id].clone(),
                    arrival_time: job.arrival_time,
                    burst_time: job.burst_time,
                    start_time: job.start_time.expect("Completed job missing start time"),
                    exit_time: job.exit_time.expect("Completed job missing exit time"),
                }
            })
            .collect();

        let events = state
            .events
            .iter()
            .map(|event| TraceEvent {
                tick: event.tick,
                id: self.ids[event.job].clone(),
                kind: event.kind,
            })
            .collect();

        RunReport {
            algorithm: S::NAME,
            completed,
            events,
        }
    }
}

pub fn simulate<S: Scheduler>(workload: &Workload, scheduler: S) -> RunReport {
    info!("simulating {} jobs under {}", workload.len(), S::NAME);
    let mut sim = Sim::new(workload, scheduler);
    while !sim.done() {
        sim.step();
    }
    sim.into_report()
}

pub fn run(workload: &Workload, algorithm: Algorithm) -> Result<RunReport, InvalidQuantum> {
    match algorithm {
        Algorithm::Fcfs => Ok(simulate(workload, FcfsScheduler::new())),
        Algorithm::RoundRobin { quantum } => Ok(simulate(workload, RrScheduler::new(quantum)?)),
        Algorithm::Srtf => Ok(simulate(workload, SrtfScheduler::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Phase;
    use crate::sim::job::JobSpec;

    fn workload(jobs: &[(&str, Ticks, Ticks)]) -> Workload {
        Workload::new(
            jobs.iter()
                .map(|&(id, burst, arrival)| JobSpec::new(id, burst, arrival))
                .collect(),
        )
        .unwrap()
    }

    fn drive<S: Scheduler>(workload: &Workload, scheduler: S) -> Sim<S> {
        let mut sim = Sim::new(workload, scheduler);
        while !sim.done() {
            sim.step();
        }
        sim
    }

    fn exits(report: &RunReport) -> Vec<(&str, Ticks)> {
        report
            .completed
            .iter()
            .map(|job| (job.id.as_str(), job.exit_time))
            .collect()
    }

    #[test]
    fn fcfs_is_deterministic_and_non_preemptive() {
        let workload = workload(&[("A", 5, 0), ("B", 3, 2), ("C", 1, 4)]);
        let report = simulate(&workload, FcfsScheduler::new());

        assert_eq!(exits(&report), vec![("A", 5), ("B", 8), ("C", 9)]);
        assert!(report
            .events
            .iter()
            .all(|event| event.kind == EventKind::Terminated));
    }

    #[test]
    fn rr_reproduces_the_textbook_example() {
        let workload = workload(&[("P1", 24, 0), ("P2", 3, 0), ("P3", 3, 0)]);
        let report = simulate(&workload, RrScheduler::new(4).unwrap());

        assert_eq!(exits(&report), vec![("P2", 7), ("P3", 10), ("P1", 30)]);

        let waiting: Vec<_> = report
            .completed
            .iter()
            .map(|job| (job.id.as_str(), job.waiting_time()))
            .collect();
        assert_eq!(waiting, vec![("P2", 4), ("P3", 7), ("P1", 6)]);

        assert_eq!(
            report.events[0],
            TraceEvent {
                tick: 4,
                id: "P1".into(),
                kind: EventKind::QuantumExpired { remaining: 20 },
            }
        );
    }

    #[test]
    fn rr_finishing_at_quantum_expiry_is_not_requeued() {
        // B's burst equals the quantum: it must terminate, not cycle.
        let workload = workload(&[("A", 5, 0), ("B", 3, 0)]);
        let report = simulate(&workload, RrScheduler::new(3).unwrap());

        let expired: Vec<_> = report
            .events
            .iter()
            .filter(|event| matches!(event.kind, EventKind::QuantumExpired { .. }))
            .map(|event| event.id.as_str())
            .collect();
        assert_eq!(expired, vec!["A"]);
        assert_eq!(exits(&report), vec![("B", 6), ("A", 8)]);
    }

    #[test]
    fn rr_no_segment_exceeds_the_quantum() {
        let quantum = 3;
        let workload = workload(&[("A", 7, 0), ("B", 2, 1), ("C", 3, 3)]);
        let mut sim = Sim::new(&workload, RrScheduler::new(quantum).unwrap());

        while !sim.done() {
            sim.step();
            if let Phase::Running { quantum_elapsed, .. } = sim.engine.state.phase {
                assert!(quantum_elapsed <= quantum);
            }
        }

        // A short job completes in a single segment.
        let report = sim.into_report();
        let b_events: Vec<_> = report
            .events
            .iter()
            .filter(|event| event.id == "B")
            .collect();
        assert_eq!(b_events.len(), 1);
        assert_eq!(b_events[0].kind, EventKind::Terminated);
    }

    #[test]
    fn srtf_preempts_on_strictly_shorter_arrival() {
        let workload = workload(&[("A", 8, 0), ("B", 4, 1), ("C", 9, 2), ("D", 5, 3)]);
        let report = simulate(&workload, SrtfScheduler::new());

        assert_eq!(
            exits(&report),
            vec![("B", 5), ("D", 10), ("A", 17), ("C", 26)]
        );
        assert_eq!(
            report.events[0],
            TraceEvent {
                tick: 1,
                id: "A".into(),
                kind: EventKind::Preempted { remaining: 7 },
            }
        );
    }

    #[test]
    fn srtf_mean_waiting_never_worse_than_fcfs() {
        let workload = workload(&[("A", 8, 0), ("B", 4, 1), ("C", 9, 2), ("D", 5, 3)]);

        let mean_waiting = |report: &RunReport| {
            let total: Ticks = report.completed.iter().map(CompletedJob::waiting_time).sum();
            total as f64 / report.completed.len() as f64
        };

        let fcfs = simulate(&workload, FcfsScheduler::new());
        let srtf = simulate(&workload, SrtfScheduler::new());
        assert!(mean_waiting(&srtf) <= mean_waiting(&fcfs));
    }

    #[test]
    fn work_is_conserved_across_policies() {
        let workload = workload(&[("A", 6, 0), ("B", 2, 1), ("C", 4, 2), ("D", 3, 9)]);
        let total_burst: Ticks = workload.jobs().iter().map(|job| job.burst_time).sum();

        let fcfs = drive(&workload, FcfsScheduler::new());
        let rr = drive(&workload, RrScheduler::new(2).unwrap());
        let srtf = drive(&workload, SrtfScheduler::new());

        for state in [&fcfs.engine.state, &rr.engine.state, &srtf.engine.state] {
            assert_eq!(state.busy_ticks, total_burst);
            assert!(state.jobs.iter().all(|job| job.remaining_time == 0));
            assert_eq!(state.completed.len(), workload.len());

            let exits: Vec<_> = state
                .completed
                .iter()
                .map(|&job| state.jobs[job].exit_time.unwrap())
                .collect();
            assert!(exits.windows(2).all(|pair| pair[0] <= pair[1]));
            for job in &state.jobs {
                assert!(job.exit_time.unwrap() >= job.arrival_time + job.burst_time);
            }
        }
    }

    #[test]
    fn engine_idles_through_arrival_gaps() {
        let workload = workload(&[("A", 2, 0), ("B", 3, 10)]);
        let report = simulate(&workload, FcfsScheduler::new());

        assert_eq!(exits(&report), vec![("A", 2), ("B", 13)]);
        assert_eq!(report.completed[1].start_time, 10);
    }

    #[test]
    fn runs_do_not_contaminate_each_other() {
        let workload = workload(&[("A", 5, 0), ("B", 3, 1), ("C", 4, 2)]);

        let first = simulate(&workload, FcfsScheduler::new());
        let _ = simulate(&workload, SrtfScheduler::new());
        let _ = simulate(&workload, RrScheduler::new(2).unwrap());
        let again = simulate(&workload, FcfsScheduler::new());

        assert_eq!(first.completed, again.completed);
        assert_eq!(first.events, again.events);
    }

    #[test]
    fn run_selects_by_algorithm() {
        let workload = workload(&[("A", 4, 0), ("B", 2, 0)]);

        let fcfs = run(&workload, Algorithm::Fcfs).unwrap();
        assert_eq!(fcfs.algorithm, "FCFS");

        let srtf = run(&workload, Algorithm::Srtf).unwrap();
        assert_eq!(srtf.algorithm, "SRTF");
        assert_eq!(exits(&srtf), vec![("B", 2), ("A", 6)]);

        assert!(run(&workload, Algorithm::RoundRobin { quantum: 0 }).is_err());
    }
}
