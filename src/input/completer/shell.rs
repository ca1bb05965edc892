use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::{command::CommandCompleter, path::PathCompleter};
use crate::core::commands::Verb;
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(home: &Path, current_dir: &Path) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(home, current_dir),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.path_completer.set_base_dir(dir);
    }

    pub fn candidates(&self, line_up_to_cursor: &str, pos: usize) -> (usize, Vec<Pair>) {
        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();

        if line_up_to_cursor.is_empty() || line_up_to_cursor.ends_with(char::is_whitespace) {
            words.push("");
        }

        let last_word = words.last().copied().unwrap_or("");
        let start = pos - last_word.len();

        let matches = match words.as_slice() {
            [verb] => self.command_completer.complete_command(verb),
            [verb, flag] if *verb == Verb::Os.name() => {
                self.command_completer.complete_os_flag(flag)
            }
            _ => self.path_completer.complete_path(last_word),
        };

        (start, matches)
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.highlighter.is_enabled() {
            Cow::Owned(self.highlighter.highlight_command(line))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.highlighter.is_enabled()
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos], pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn completer_in(dir: &Path) -> ShellCompleter {
        ShellCompleter::new(dir, dir)
    }

    #[test]
    fn test_first_word_completes_verbs() {
        let temp = TempDir::new().unwrap();
        let completer = completer_in(temp.path());

        let (start, matches) = completer.candidates("ha", 2);
        assert_eq!(start, 0);
        assert_eq!(matches[0].replacement, "hash ");
    }

    #[test]
    fn test_os_argument_completes_flags() {
        let temp = TempDir::new().unwrap();
        let completer = completer_in(temp.path());

        let (start, matches) = completer.candidates("os --c", 6);
        assert_eq!(start, 3);
        assert_eq!(matches[0].replacement, "--cpus");
    }

    #[test]
    fn test_later_words_complete_paths() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("photo.png"), "").unwrap();
        let mut completer = completer_in(Path::new("/"));
        completer.set_current_dir(temp.path().to_path_buf());

        let (start, matches) = completer.candidates("cat ph", 6);
        assert_eq!(start, 4);
        assert_eq!(matches[0].replacement, "photo.png ");

        let (start, matches) = completer.candidates("cat ", 4);
        assert_eq!(start, 4);
        assert_eq!(matches.len(), 1);
    }
}
