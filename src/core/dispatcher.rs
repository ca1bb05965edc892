use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::commands::{Command, Verb};
use super::session::Session;
use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Dispatcher<W> {
    session: Session,
    out: W,
}

impl<W> Dispatcher<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(session: Session, out: W) -> Self {
        Self { session, out }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn writer(&self) -> &W {
        &self.out
    }

    pub async fn greet(&mut self) -> Result<(), ShellError> {
        let greeting = self.session.greeting();
        self.write(&format!("{greeting}\n")).await?;
        self.print_location().await
    }

    pub async fn farewell(&mut self) -> Result<(), ShellError> {
        let farewell = self.session.farewell();
        self.write(&format!("{farewell}\n")).await
    }

    // only a broken output stream escapes as an error
    pub async fn dispatch(&mut self, line: &str) -> Result<Flow, ShellError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                debug!(line, error = %err, "rejected input");
                self.write("Invalid input\n\n").await?;
                return Ok(Flow::Continue);
            }
        };

        let verb = command.verb();
        if verb == Verb::Exit {
            return Ok(Flow::Exit);
        }

        debug!(%verb, "dispatching");
        if let Err(err) = command.execute(&mut self.session, &mut self.out).await {
            warn!(%verb, error = %err, "operation failed");
            self.write(&format!("{err}\nOperation failed\n")).await?;
        }
        self.print_location().await?;
        Ok(Flow::Continue)
    }

    async fn print_location(&mut self) -> Result<(), ShellError> {
        let location = self.session.location();
        self.write(&format!("{location}\n\n")).await
    }

    async fn write(&mut self, text: &str) -> Result<(), ShellError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn dispatcher_in(home: &Path) -> Dispatcher<Vec<u8>> {
        Dispatcher::new(Session::with_home(Some("Tester".to_string()), home), Vec::new())
    }

    fn take_output(dispatcher: &mut Dispatcher<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut dispatcher.out)).unwrap()
    }

    #[tokio::test]
    async fn test_greet_prints_welcome_and_location() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.greet().await.unwrap();
        assert_eq!(
            take_output(&mut dispatcher),
            format!(
                "Welcome to the File Manager, Tester!\nYou are currently in {}\n\n",
                temp.path().display()
            )
        );
    }

    #[tokio::test]
    async fn test_unknown_verb_prints_invalid_input_only() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        let flow = dispatcher.dispatch("frobnicate now").await.unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(take_output(&mut dispatcher), "Invalid input\n\n");
        assert_eq!(dispatcher.session().current_dir(), temp.path());
    }

    #[tokio::test]
    async fn test_exit_returns_exit_flow() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        assert_eq!(dispatcher.dispatch(".exit").await.unwrap(), Flow::Exit);
        assert!(dispatcher.writer().is_empty());

        dispatcher.farewell().await.unwrap();
        assert_eq!(
            take_output(&mut dispatcher),
            "Thank you for using File Manager, Tester, goodbye!\n"
        );
    }

    #[tokio::test]
    async fn test_failed_cd_reports_and_reprints_location() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("cd missing").await.unwrap();
        let printed = take_output(&mut dispatcher);

        assert!(printed.starts_with("stat '"));
        assert!(printed.ends_with(&format!(
            "Operation failed\nYou are currently in {}\n\n",
            temp.path().display()
        )));
        assert_eq!(dispatcher.session().current_dir(), temp.path());
    }

    #[tokio::test]
    async fn test_cd_and_back_round_trips() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("cd sub").await.unwrap();
        assert_eq!(dispatcher.session().current_dir(), temp.path().join("sub"));
        assert_eq!(
            take_output(&mut dispatcher),
            format!("You are currently in {}\n\n", temp.path().join("sub").display())
        );

        dispatcher.dispatch("cd ..").await.unwrap();
        assert_eq!(dispatcher.session().current_dir(), temp.path());
    }

    #[tokio::test]
    async fn test_up_moves_to_parent() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("up").await.unwrap();
        assert_eq!(
            Some(dispatcher.session().current_dir()),
            temp.path().parent()
        );
    }

    #[tokio::test]
    async fn test_add_then_cat_in_current_dir() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("add fresh.txt").await.unwrap();
        assert!(temp.path().join("fresh.txt").exists());
        take_output(&mut dispatcher);

        dispatcher.dispatch("cat fresh.txt").await.unwrap();
        assert_eq!(
            take_output(&mut dispatcher),
            format!(
                "{}You are currently in {}\n\n",
                crate::core::commands::LINE_ENDING,
                temp.path().display()
            )
        );
    }

    #[tokio::test]
    async fn test_ls_lists_current_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();
        std::fs::write(temp.path().join("a.txt"), "").unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("ls").await.unwrap();
        let printed = take_output(&mut dispatcher);
        let docs = printed.find("docs").unwrap();
        let file = printed.find("a.txt").unwrap();
        assert!(docs < file);
    }

    #[tokio::test]
    async fn test_wrong_arity_is_invalid_input() {
        let temp = TempDir::new().unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("cp only-source").await.unwrap();
        assert_eq!(take_output(&mut dispatcher), "Invalid input\n\n");
    }

    #[tokio::test]
    async fn test_compress_and_decompress_through_dispatch() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("out")).unwrap();
        std::fs::write(temp.path().join("data.txt"), "round trip").unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("compress data.txt .").await.unwrap();
        dispatcher.dispatch("decompress data.txt.gz out").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("out/data.txt")).unwrap(),
            "round trip"
        );
        let printed = take_output(&mut dispatcher);
        assert!(printed.contains("file compressed!\n"));
        assert!(printed.contains("file decompressed!\n"));
        assert!(!printed.contains("Operation failed"));
    }

    #[tokio::test]
    async fn test_copy_prints_only_location() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("dest")).unwrap();
        std::fs::write(temp.path().join("a.txt"), "data").unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("cp a.txt dest").await.unwrap();
        assert_eq!(
            take_output(&mut dispatcher),
            format!("You are currently in {}\n\n", temp.path().display())
        );
        assert_eq!(
            std::fs::read_to_string(temp.path().join("dest/a.txt")).unwrap(),
            "data"
        );
    }

    #[tokio::test]
    async fn test_hash_resolves_against_session() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("abc.txt"), "abc").unwrap();
        let mut dispatcher = dispatcher_in(temp.path());

        dispatcher.dispatch("hash abc.txt").await.unwrap();
        assert!(take_output(&mut dispatcher)
            .starts_with("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"));
    }
}
