pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::Engine;
pub use event::{Event, EventKind};
pub use state::{JobId, JobState, Phase, SimState, Ticks};
