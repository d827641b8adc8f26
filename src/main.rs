use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::prelude::*;

use schedsim::stats::{self, Summary};
use schedsim::{sim, Algorithm, JobSpec, RunReport, Workload};

/// Tick-driven CPU scheduling simulator: runs FCFS, round-robin, and SRTF
/// over the same workload and reports per-job turnaround and waiting times.
#[derive(Parser)]
#[command(name = "schedsim")]
struct Cli {
    /// Workload file with one `id burst arrival` triple per line
    workload: Option<PathBuf>,

    /// Round-robin time quantum in ticks
    #[arg(short, long, default_value_t = 3)]
    quantum: u64,

    /// Number of jobs to generate when no workload file is given
    #[arg(long, default_value_t = 8)]
    jobs: usize,

    /// Seed for the generated workload
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let specs = match &cli.workload {
        Some(path) => load_jobs(path)
            .with_context(|| format!("failed to load workload from {}", path.display()))?,
        None => bernoulli_jobs(cli.jobs, 0.3, 0.5, cli.seed),
    };
    let workload = Workload::new(specs)?;

    for algorithm in [
        Algorithm::Fcfs,
        Algorithm::RoundRobin {
            quantum: cli.quantum,
        },
        Algorithm::Srtf,
    ] {
        let report = sim::run(&workload, algorithm)?;
        print_report(&report);
    }

    Ok(())
}

fn load_jobs(path: &Path) -> Result<Vec<JobSpec>> {
    let text = fs::read_to_string(path)?;
    let mut jobs = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[id, burst, arrival] = fields.as_slice() else {
            bail!("line {}: expected `id burst arrival`", number + 1);
        };
        let burst = burst
            .parse()
            .with_context(|| format!("line {}: bad burst time {burst:?}", number + 1))?;
        let arrival = arrival
            .parse()
            .with_context(|| format!("line {}: bad arrival time {arrival:?}", number + 1))?;
        jobs.push(JobSpec::new(id, burst, arrival));
    }

    Ok(jobs)
}

fn bernoulli_jobs(count: usize, p_arrival: f64, p_short: f64, seed: u64) -> Vec<JobSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::with_capacity(count);
    let mut tick = 0;

    while jobs.len() < count {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                rng.random_range(1..=4)
            } else {
                rng.random_range(5..=12)
            };
            jobs.push(JobSpec::new(format!("P{}", jobs.len() + 1), burst, tick));
        }
        tick += 1;
    }

    jobs
}

fn print_report(report: &RunReport) {
    println!("{} scheduling", report.algorithm);
    println!();
    for event in &report.events {
        println!("t={:<5} {:<8} {}", event.tick, event.id, event.kind);
    }
    println!();
    print_table(&stats::summarize(&report.completed));
    println!();
}

fn print_table(summary: &Summary) {
    let rule = "+------------+-----------------+--------------+";
    println!("{rule}");
    println!(
        "| {:<10} | {:>15} | {:>12} |",
        "Process ID", "Turnaround Time", "Waiting Time"
    );
    println!("{rule}");
    for row in &summary.rows {
        println!(
            "| {:<10} | {:>15} | {:>12} |",
            row.id, row.turnaround_time, row.waiting_time
        );
    }
    println!(
        "| {:<10} | {:>15.2} | {:>12.2} |",
        "Average", summary.mean_turnaround, summary.mean_waiting
    );
    println!("{rule}");
}
