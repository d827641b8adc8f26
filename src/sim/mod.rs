pub mod driver;
pub mod job;

pub use driver::{run, simulate, Algorithm, RunReport, Sim, TraceEvent};
pub use job::{CompletedJob, JobSpec, Workload, WorkloadError};
