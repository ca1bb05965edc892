pub mod commands;
pub mod dispatcher;
pub mod session;
pub mod table;

pub use commands::{Command, CommandError, ParseError, Verb};
pub use dispatcher::{Dispatcher, Flow};
pub use session::Session;
