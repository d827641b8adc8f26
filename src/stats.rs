use average::{Estimate, Mean};

use crate::core::state::Ticks;
use crate::sim::job::CompletedJob;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMetrics {
    pub id: String,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    // Ordered by ascending job id
    pub rows: Vec<JobMetrics>,
    pub mean_turnaround: f64,
    pub mean_waiting: f64,
}

pub fn summarize(completed: &[CompletedJob]) -> Summary {
    assert!(
        !completed.is_empty(),
        "Statistics require at least one completed job"
    );

    let mut rows: Vec<JobMetrics> = completed
        .iter()
        .map(|job| JobMetrics {
            id: job.id.clone(),
            turnaround_time: job.turnaround_time(),
            waiting_time: job.waiting_time(),
        })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));

    let mean_turnaround = avg(rows.iter().map(|row| row.turnaround_time as f64));
    let mean_waiting = avg(rows.iter().map(|row| row.waiting_time as f64));

    Summary {
        rows,
        mean_turnaround,
        mean_waiting,
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
