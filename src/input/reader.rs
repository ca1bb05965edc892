use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use rustyline::{config::Configurer, error::ReadlineError, history::DefaultHistory, Editor};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::completer::ShellCompleter;
use crate::error::ShellError;
use crate::flags::Flags;

const PROMPT: &str = "> ";
const HISTORY_SIZE: usize = 1000;

#[derive(Debug)]
pub enum InputEvent {
    Line {
        text: String,
        done: oneshot::Sender<PathBuf>,
    },
    Interrupted,
    Eof,
}

pub struct LineReader {
    editor: Editor<ShellCompleter, DefaultHistory>,
    quiet: bool,
}

impl LineReader {
    pub fn new(flags: &Flags, home: &Path, current_dir: &Path) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(home, current_dir)));
        editor.set_auto_add_history(true);
        editor.set_max_history_size(HISTORY_SIZE)?;

        Ok(Self {
            editor,
            quiet: flags.is_set("quiet"),
        })
    }

    pub fn spawn(self, events: mpsc::Sender<InputEvent>) -> Result<JoinHandle<()>, ShellError> {
        let handle = thread::Builder::new()
            .name("line-reader".to_string())
            .spawn(move || self.run(events))?;
        Ok(handle)
    }

    fn run(mut self, events: mpsc::Sender<InputEvent>) {
        loop {
            let event = match self.editor.readline(PROMPT) {
                Ok(text) => {
                    let (done, ready) = oneshot::channel();
                    if events.blocking_send(InputEvent::Line { text, done }).is_err() {
                        break;
                    }
                    match ready.blocking_recv() {
                        Ok(dir) => {
                            if let Some(helper) = self.editor.helper_mut() {
                                helper.set_current_dir(dir);
                            }
                            continue;
                        }
                        Err(_) => break,
                    }
                }
                Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
                Err(ReadlineError::Eof) => InputEvent::Eof,
                Err(err) => {
                    if !self.quiet {
                        eprintln!("Error: {}", err);
                    }
                    warn!(error = %err, "line editor failed");
                    InputEvent::Eof
                }
            };

            debug!(?event, "line source closing");
            let _ = events.blocking_send(event);
            break;
        }
    }
}
