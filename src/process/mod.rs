pub mod signal;
pub mod terminal;

pub use signal::{install as install_signal_handlers, Shutdown, SignalError};
pub use terminal::TerminalState;
