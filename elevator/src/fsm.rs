/// ----- FSM MODULE -----
/// This module runs the state machine of one elevator. Every message on the
/// ticker moves the car by one step; a message on (or a hang-up of) the stop
/// channel ends the loop. The ticker is injected, so the loop can be driven
/// by `crossbeam_channel::tick` in production and step by step in tests.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{select, Receiver, Sender, unbounded};
use log::{debug, error, info};
use parking_lot::Mutex;

use shared_resources::error::Result;

use crate::unit::ElevatorUnit;

pub type SharedElevator = Arc<Mutex<ElevatorUnit>>;

pub fn main(
    elevator: SharedElevator,
    ticker: Receiver<Instant>,
    stop_rx: Receiver<()>,
) -> Result<()> {
    let label = elevator.lock().label().to_string();
    info!("Elevator {} control loop started", label);

    loop {
        select! {
            recv(ticker) -> msg => {
                if msg.is_err() {
                    debug!("Elevator {} lost its ticker", label);
                    break;
                }
                let mut unit = elevator.lock();
                if let Err(err) = unit.tick() {
                    error!("Elevator {} stopped on a broken invariant: {}", label, err);
                    return Err(err);
                }
            },
            recv(stop_rx) -> _ => {
                break;
            },
        }
    }

    info!("Elevator {} control loop stopped", label);
    Ok(())
}

/// A launched control loop and the means to stop it.
pub struct RunningElevator {
    label: String,
    stop_tx: Sender<()>,
    handle: JoinHandle<Result<()>>,
}

impl RunningElevator {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the loop to stop and waits for its thread.
    pub fn stop(self) -> Result<()> {
        // the loop may already have exited on its own, closing the channel
        let _ = self.stop_tx.send(());
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => {
                error!("Elevator {} control thread panicked", self.label);
                Ok(())
            }
        }
    }
}

/// Starts the control loop of `elevator` on its own named thread.
pub fn spawn(elevator: SharedElevator, ticker: Receiver<Instant>) -> Result<RunningElevator> {
    let label = elevator.lock().label().to_string();
    let (stop_tx, stop_rx) = unbounded();
    let handle = thread::Builder::new()
        .name(format!("elevator-{}", label))
        .spawn(move || main(elevator, ticker, stop_rx))?;

    Ok(RunningElevator { label, stop_tx, handle })
}
