use std::collections::BTreeSet;

use rustyline::completion::Pair;

use crate::core::commands::{OsQuery, Verb};

#[derive(Clone)]
pub struct CommandCompleter {
    verbs: BTreeSet<&'static str>,
    os_flags: BTreeSet<&'static str>,
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            verbs: Verb::names().collect(),
            os_flags: OsQuery::ALL.into_iter().map(OsQuery::flag).collect(),
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        Self::matches(&self.verbs, input.trim(), " ")
    }

    pub fn complete_os_flag(&self, input: &str) -> Vec<Pair> {
        Self::matches(&self.os_flags, input.trim(), "")
    }

    fn matches(candidates: &BTreeSet<&'static str>, input: &str, trailer: &str) -> Vec<Pair> {
        candidates
            .iter()
            .filter(|candidate| candidate.starts_with(input))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: format!("{candidate}{trailer}"),
            })
            .collect()
    }
}
