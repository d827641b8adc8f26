use std::fmt;

use crate::core::state::{JobId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Terminated,
    QuantumExpired { remaining: Ticks },
    Preempted { remaining: Ticks },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub tick: Ticks,
    pub job: JobId,
    pub kind: EventKind,
}

impl fmt::Display for EventKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventKind::Terminated => write!(formatter, "terminated"),
            EventKind::QuantumExpired { remaining } => {
                write!(formatter, "quantum expired - {remaining} ticks remaining")
            }
            EventKind::Preempted { remaining } => {
                write!(formatter, "preempted - {remaining} ticks remaining")
            }
        }
    }
}
