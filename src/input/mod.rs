mod completer;
mod reader;

pub use completer::{CommandCompleter, PathCompleter, ShellCompleter};
pub use reader::{InputEvent, LineReader};
