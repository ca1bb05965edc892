use std::path::{Path, PathBuf};

use crate::error::ShellError;
use crate::path::{self, PathExpander, PathPolicy};

pub const DEFAULT_DISPLAY_NAME: &str = "dear user";

#[derive(Debug, Clone)]
pub struct Session {
    display_name: String,
    current_dir: PathBuf,
    expander: PathExpander,
}

impl Session {
    pub fn new(display_name: Option<String>) -> Result<Self, ShellError> {
        let home = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
        Ok(Self::with_home(display_name, home))
    }

    pub fn with_home(display_name: Option<String>, home: impl Into<PathBuf>) -> Self {
        let home = path::normalize(&home.into());
        Self {
            display_name: display_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            current_dir: home.clone(),
            expander: PathExpander::new(home),
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn home_dir(&self) -> &Path {
        self.expander.home_dir()
    }

    pub fn set_current_dir(&mut self, dir: impl Into<PathBuf>) {
        self.current_dir = dir.into();
    }

    pub fn resolve(&self, arg: &str, policy: PathPolicy) -> std::io::Result<PathBuf> {
        path::resolve(&self.expander, &self.current_dir, arg, policy)
    }

    pub fn greeting(&self) -> String {
        format!("Welcome to the File Manager, {}!", self.display_name)
    }

    pub fn location(&self) -> String {
        format!("You are currently in {}", self.current_dir.display())
    }

    pub fn farewell(&self) -> String {
        format!(
            "Thank you for using File Manager, {}, goodbye!",
            self.display_name
        )
    }
}
