//! Run a sequencer on a virtual clock.
//!
//! Drives complete instantly and waits only move the clock, so whole circuits can be
//! inspected without sleeping.

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

use crate::{
    sequencer::{Command, Sequencer, State},
    stage::Stage,
};

/// One executed command of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// When the command started.
    pub at: Duration,
    /// The lorry's left offset when the command started.
    pub lorry_left: f64,
    pub line: usize,
    pub state: State,
    pub command: Command,
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>8} ms  line {:<2} {:>7} px  {:<28} {}",
            self.at.as_millis(),
            self.line,
            self.lorry_left,
            self.state.to_string(),
            self.command
        )
    }
}

#[derive(Debug)]
pub struct Simulation<S> {
    sequencer: Sequencer<S>,
    clock: Duration,
    circuits: usize,
    started: bool,
}

impl<S: Stage> Simulation<S> {
    pub fn new(sequencer: Sequencer<S>) -> Self {
        Self {
            sequencer,
            clock: Duration::ZERO,
            circuits: 0,
            started: false,
        }
    }

    /// Fetch the next command and carry it out.
    pub fn step(&mut self) -> Entry {
        let command = if self.started {
            self.sequencer.advance()
        } else {
            self.started = true;
            self.sequencer.start()
        };
        let entry = Entry {
            at: self.clock,
            lorry_left: self.sequencer.stage().lorry_left(),
            line: self.sequencer.line(),
            // a command always follows a transition, so there is a state
            state: self.sequencer.state().unwrap_or(State::Parked { resume_at: 0 }),
            command,
        };
        match command {
            Command::Wait(duration) => self.clock += duration,
            Command::Drive { to, duration } => {
                self.sequencer.stage_mut().set_lorry_left(to);
                self.clock += duration;
                if entry.state == State::EndOfCircuit {
                    self.circuits += 1;
                }
            }
        }
        entry
    }

    /// Step until `circuits` more circuits were driven and the lorry is back in the depot.
    pub fn run_circuits(&mut self, circuits: usize) -> Vec<Entry> {
        let target = self.circuits + circuits;
        let mut entries = vec![];
        while self.circuits < target {
            entries.push(self.step());
        }
        // the pause after the last drive and the return to the depot
        for _ in 0..2 {
            entries.push(self.step());
        }
        entries
    }

    /// Virtual time passed since the start.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Number of circuits completed so far.
    pub fn circuits(&self) -> usize {
        self.circuits
    }
}
