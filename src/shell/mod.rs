use tokio::io::{AsyncWrite, Stdout};
use tokio::sync::mpsc;
use tracing::debug;

use crate::{
    core::{Dispatcher, Flow, Session},
    error::ShellError,
    flags::Flags,
    input::{InputEvent, LineReader},
    process::{self, Shutdown},
};

pub struct Shell {
    dispatcher: Dispatcher<Stdout>,
    reader: LineReader,
    shutdown: mpsc::UnboundedReceiver<Shutdown>,
}

impl Shell {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        let session = Session::new(flags.get_value("username").cloned())?;
        let reader = LineReader::new(flags, session.home_dir(), session.current_dir())?;

        let (shutdown_tx, shutdown) = mpsc::unbounded_channel();
        process::install_signal_handlers(shutdown_tx)?;

        Ok(Shell {
            dispatcher: Dispatcher::new(session, tokio::io::stdout()),
            reader,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<(), ShellError> {
        let Shell {
            mut dispatcher,
            reader,
            mut shutdown,
        } = self;

        dispatcher.greet().await?;

        let (events_tx, mut events) = mpsc::channel(1);
        let _reader = reader.spawn(events_tx)?;

        drive(&mut dispatcher, &mut events, &mut shutdown).await?;
        dispatcher.farewell().await
    }
}

pub async fn drive<W>(
    dispatcher: &mut Dispatcher<W>,
    events: &mut mpsc::Receiver<InputEvent>,
    shutdown: &mut mpsc::UnboundedReceiver<Shutdown>,
) -> Result<(), ShellError>
where
    W: AsyncWrite + Unpin + Send,
{
    loop {
        let event = tokio::select! {
            biased;
            Some(signal) = shutdown.recv() => {
                debug!(?signal, "shutting down");
                return Ok(());
            }
            event = events.recv() => event,
        };

        let (text, done) = match event {
            Some(InputEvent::Line { text, done }) => (text, done),
            Some(InputEvent::Interrupted) | Some(InputEvent::Eof) | None => return Ok(()),
        };

        let flow = tokio::select! {
            biased;
            Some(signal) = shutdown.recv() => {
                debug!(?signal, "shutting down with an operation in flight");
                return Ok(());
            }
            flow = dispatcher.dispatch(&text) => flow?,
        };

        if flow == Flow::Exit {
            return Ok(());
        }
        let _ = done.send(dispatcher.session().current_dir().to_path_buf());
    }
}
