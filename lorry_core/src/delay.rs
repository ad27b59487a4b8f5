//! The delay table of the lorry.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use serde::{Deserialize, Serialize};

static DEFAULT_INIT: u64 = 1000;
static DEFAULT_BUSY: u64 = 1200;
static DEFAULT_DRIVE_1PX: u64 = 7;
static DEFAULT_REPEAT: u64 = 5000;
static DEFAULT_CONTINUE: u64 = 600;

/// The pauses the lorry takes, all in milliseconds.
///
/// Every field falls back to its default, so a table like `{"busy": 800}` is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    /// pause before the very first departure
    pub init: u64,
    /// pause at each stop
    pub busy: u64,
    /// travel time per pixel
    #[serde(rename = "drive1px")]
    pub drive_1px: u64,
    /// pause in the depot before the next circuit
    pub repeat: u64,
    /// pause when switching to another line
    #[serde(rename = "continue")]
    pub line_switch: u64,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            init: DEFAULT_INIT,
            busy: DEFAULT_BUSY,
            drive_1px: DEFAULT_DRIVE_1PX,
            repeat: DEFAULT_REPEAT,
            line_switch: DEFAULT_CONTINUE,
        }
    }
}

impl Delays {
    pub fn pause(&self, kind: DelayKind) -> Duration {
        Duration::from_millis(match kind {
            DelayKind::Init => self.init,
            DelayKind::Busy => self.busy,
            DelayKind::Repeat => self.repeat,
            DelayKind::Continue => self.line_switch,
        })
    }

    /// Get the time needed to cover a distance in pixels.
    ///
    /// The lorry keeps its speed, so the direction does not matter and longer journeys take longer.
    pub fn travel(&self, distance: f64) -> Duration {
        let millis = (distance.abs() * self.drive_1px as f64).round();
        Duration::from_millis(millis as u64)
    }
}

/// Selects one of the pauses of [`Delays`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayKind {
    Init,
    Busy,
    Repeat,
    Continue,
}

impl DelayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Busy => "busy",
            Self::Repeat => "repeat",
            Self::Continue => "continue",
        }
    }
}

impl Display for DelayKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
