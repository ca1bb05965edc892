use thiserror::Error;

use crate::process::SignalError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Flag error: {0}")]
    FlagError(String),
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
}
