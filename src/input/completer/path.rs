use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

use crate::path::PathExpander;

#[derive(Clone)]
pub struct PathCompleter {
    base_dir: PathBuf,
    expander: PathExpander,
}

impl PathCompleter {
    pub fn new(home: &Path, base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            expander: PathExpander::new(home),
        }
    }

    pub fn set_base_dir(&mut self, base_dir: PathBuf) {
        self.base_dir = base_dir;
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = split_input(incomplete);
        let dir_to_search = if typed_dir.is_empty() {
            self.base_dir.clone()
        } else {
            self.base_dir.join(self.expander.expand(typed_dir))
        };

        self.get_path_matches(&dir_to_search, typed_dir, file_prefix)
    }

    fn get_path_matches(&self, dir_to_search: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let mut matches = Vec::new();

        if let Ok(entries) = fs::read_dir(dir_to_search) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(file_prefix) {
                        matches.push(self.create_completion_pair(name, &entry.path(), typed_dir));
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn create_completion_pair(&self, name: &str, path: &Path, typed_dir: &str) -> Pair {
        let relative_path = format!("{typed_dir}{name}");

        if path.is_dir() {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}/", relative_path),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{} ", relative_path),
            }
        }
    }
}

fn split_input(incomplete: &str) -> (&str, &str) {
    match incomplete.rfind('/') {
        Some(index) => (&incomplete[..=index], &incomplete[index + 1..]),
        None => ("", incomplete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("docs/re"), ("docs/", "re"));
        assert_eq!(split_input("/etc/"), ("/etc/", ""));
        assert_eq!(split_input("file"), ("", "file"));
    }

    #[test]
    fn test_completes_relative_to_base_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();
        std::fs::write(temp.path().join("draft.txt"), "").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "").unwrap();

        let completer = PathCompleter::new(temp.path(), temp.path());
        assert_eq!(
            replacements(completer.complete_path("d")),
            vec!["docs/", "draft.txt "]
        );
    }

    #[test]
    fn test_completes_inside_typed_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("docs")).unwrap();
        std::fs::write(temp.path().join("docs/report.md"), "").unwrap();

        let mut completer = PathCompleter::new(temp.path(), Path::new("/"));
        completer.set_base_dir(temp.path().to_path_buf());
        assert_eq!(
            replacements(completer.complete_path("docs/re")),
            vec!["docs/report.md "]
        );
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let completer = PathCompleter::new(temp.path(), temp.path());
        assert!(completer.complete_path("nope/x").is_empty());
    }
}
