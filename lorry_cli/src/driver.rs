//! Drive the lorry in real time on the tokio clock.

use log::info;
use lorry_core::{
    sequencer::{Command, Sequencer, State},
    stage::Stage,
};
use tokio::time::sleep;

/// Carry out the commands of the sequencer until `circuits` circuits are done.
///
/// With `circuits` being 0 the lorry never stops.
pub async fn run<S: Stage>(mut sequencer: Sequencer<S>, circuits: usize) -> usize {
    let mut completed = 0;
    let mut command = sequencer.start();
    loop {
        match command {
            Command::Wait(duration) => sleep(duration).await,
            Command::Drive { to, duration } => {
                info!(
                    "{}: {} px -> {to} px",
                    sequencer
                        .state()
                        .map(|state| state.to_string())
                        .unwrap_or_default(),
                    sequencer.stage().lorry_left()
                );
                sleep(duration).await;
                sequencer.stage_mut().set_lorry_left(to);
                if sequencer.state() == Some(State::EndOfCircuit) {
                    completed += 1;
                    if completed == circuits {
                        return completed;
                    }
                }
            }
        }
        command = sequencer.advance();
    }
}
