//! The sequencer drives the lorry from stop to stop and back to the depot, forever.
//!
//! It never sleeps or animates by itself. Every transition hands a [`Command`] to the
//! scheduler, which carries it out and calls [`Sequencer::advance`] once it has finished.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use log::{debug, trace};

use crate::{
    delay::{DelayKind, Delays},
    error::InitError,
    stage::Stage,
};

/// How the calendar is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// A single week. The depot is off-screen on the left and every circuit ends
    /// off-screen on the right.
    Week,
    /// Several lines. The depot is the right edge of the current line and the lorry
    /// moves on to the next line whenever it leaves one.
    Lines,
}

/// What the scheduler has to do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Wait(Duration),
    /// Animate the lorry to the left offset `to`, taking `duration`.
    Drive { to: f64, duration: Duration },
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wait(duration) => write!(f, "wait {} ms", duration.as_millis()),
            Self::Drive { to, duration } => {
                write!(f, "drive to {to} px in {} ms", duration.as_millis())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Waiting in the depot before heading for `resume_at`.
    Parked { resume_at: usize },
    /// Heading for or serving a stop.
    Driving(usize),
    /// Leaving the current line because `resume_at` is on another one.
    EndOfLine { resume_at: usize },
    /// Leaving after the last stop.
    EndOfCircuit,
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parked { resume_at } => write!(f, "parked (next stop {resume_at})"),
            Self::Driving(stop) => write!(f, "driving (stop {stop})"),
            Self::EndOfLine { resume_at } => write!(f, "end of line (next stop {resume_at})"),
            Self::EndOfCircuit => write!(f, "end of circuit"),
        }
    }
}

/// Coarse lifecycle of the lorry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parked,
    Driving,
}

#[derive(Debug)]
pub struct Sequencer<S> {
    stage: S,
    mode: Mode,
    delays: Delays,
    lorry_width: f64,
    line: usize,
    state: Option<State>,
    arrived: bool,
}

impl<S: Stage> Sequencer<S> {
    /// Check the stage and record the lorry's width.
    ///
    /// Nothing on the stage is touched until [`Sequencer::start`].
    pub fn new(stage: S, mode: Mode, delays: Delays) -> Result<Self, InitError> {
        let stop_count = stage.stop_count();
        if stop_count == 0 {
            return Err(InitError::EmptyRoute);
        }
        let line_count = stage.line_count();
        if line_count == 0 {
            return Err(InitError::NoLines);
        }
        let line = match mode {
            Mode::Week => 0,
            Mode::Lines => {
                if let Some((stop, line)) = (0..stop_count)
                    .map(|stop| (stop, stage.stop_line(stop)))
                    .find(|(_, line)| *line >= line_count)
                {
                    return Err(InitError::StopOutsideLines { stop, line });
                }
                let line = stage.lorry_line();
                if line >= line_count {
                    return Err(InitError::LorryOutsideLines(line));
                }
                line
            }
        };
        let lorry_width = stage.lorry_width();
        debug!("lorry of {lorry_width} px ready for {stop_count} stops on {line_count} lines");
        Ok(Self {
            stage,
            mode,
            delays,
            lorry_width,
            line,
            state: None,
            arrived: false,
        })
    }

    /// Park the lorry in the depot and return the initial pause.
    pub fn start(&mut self) -> Command {
        self.park(0, DelayKind::Init)
    }

    /// Get the next command after the previous one finished.
    ///
    /// Advancing a sequencer which was never started starts it.
    pub fn advance(&mut self) -> Command {
        let Some(state) = self.state else {
            return self.start();
        };
        match (state, self.arrived) {
            (State::Parked { resume_at }, _) => self.drive_to(resume_at),
            (State::Driving(_) | State::EndOfCircuit, false) => {
                self.arrived = true;
                Command::Wait(self.delays.pause(DelayKind::Busy))
            }
            (State::EndOfLine { .. }, false) => {
                self.arrived = true;
                Command::Wait(self.delays.pause(DelayKind::Continue))
            }
            (State::Driving(stop), true) => self.drive_to(stop + 1),
            (State::EndOfLine { resume_at }, true) => self.park(resume_at, DelayKind::Continue),
            (State::EndOfCircuit, true) => self.park(0, DelayKind::Repeat),
        }
    }

    fn park(&mut self, resume_at: usize, kind: DelayKind) -> Command {
        if self.mode == Mode::Lines && kind != DelayKind::Init {
            self.line = (self.line + 1) % self.stage.line_count();
            self.stage.move_lorry_to_line(self.line);
            debug!("lorry moved to line {}", self.line);
        }
        let depot = match self.mode {
            Mode::Week => -2.0 * self.lorry_width,
            Mode::Lines => self.stage.line_width(self.line),
        };
        self.stage.place_lorry(depot);
        self.enter(State::Parked { resume_at }, true);
        debug!("lorry parked at {depot} px, {kind} pause");
        Command::Wait(self.delays.pause(kind))
    }

    fn drive_to(&mut self, next_stop: usize) -> Command {
        let line_end = self.stage.line_width(self.line);
        let (state, target) = if next_stop >= self.stage.stop_count() {
            let target = match self.mode {
                Mode::Week => line_end + 2.0 * self.lorry_width,
                Mode::Lines => line_end,
            };
            (State::EndOfCircuit, target)
        } else if self.mode == Mode::Lines && self.stage.stop_line(next_stop) != self.line {
            (
                State::EndOfLine {
                    resume_at: next_stop,
                },
                line_end,
            )
        } else {
            let span = self.stage.stop_span(next_stop);
            (State::Driving(next_stop), span.centered(self.lorry_width))
        };
        let duration = self.delays.travel(target - self.stage.lorry_left());
        self.enter(state, false);
        Command::Drive {
            to: target,
            duration,
        }
    }

    fn enter(&mut self, state: State, arrived: bool) {
        trace!("{state}");
        self.state = Some(state);
        self.arrived = arrived;
    }

    /// The current state, `None` before the start.
    pub fn state(&self) -> Option<State> {
        self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            None | Some(State::Parked { .. }) => Phase::Parked,
            Some(_) => Phase::Driving,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// The scheduler moves the lorry through this while it carries out a drive.
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }
}
