use std::thread;

use signal_hook::consts::{SIGHUP, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("failed to register handler: {0}")]
    Register(String),
}

impl From<ctrlc::Error> for SignalError {
    fn from(err: ctrlc::Error) -> Self {
        SignalError::Register(err.to_string())
    }
}

impl From<std::io::Error> for SignalError {
    fn from(err: std::io::Error) -> Self {
        SignalError::Register(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    Terminate,
}

pub fn install(shutdown: UnboundedSender<Shutdown>) -> Result<(), SignalError> {
    let interrupt = shutdown.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt.send(Shutdown::Interrupt);
    })?;

    let mut signals = Signals::new([SIGTERM, SIGHUP])?;
    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                debug!(signal, "termination signal received");
                if shutdown.send(Shutdown::Terminate).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}
