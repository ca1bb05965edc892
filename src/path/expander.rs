use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PathExpander {
    home: PathBuf,
}

impl PathExpander {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn expand(&self, path: &str) -> PathBuf {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            PathBuf::from(path)
        }
    }

    fn expand_tilde(&self, path: &str) -> PathBuf {
        if path.len() == 1 {
            return self.home.clone();
        }

        let without_tilde = &path[1..];
        if let Some(stripped) = without_tilde.strip_prefix('/') {
            let mut home_path = self.home.clone();
            for part in stripped.split('/') {
                if !part.is_empty() {
                    home_path.push(part);
                }
            }
            home_path
        } else {
            // "~name" is a plain file name here
            PathBuf::from(path)
        }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_bare_tilde() {
        let expander = PathExpander::new("/home/tester");
        assert_eq!(expander.expand("~"), PathBuf::from("/home/tester"));
    }

    #[test]
    fn test_expand_tilde_subpath() {
        let expander = PathExpander::new("/home/tester");
        assert_eq!(
            expander.expand("~/docs//notes.txt"),
            PathBuf::from("/home/tester/docs/notes.txt")
        );
    }

    #[test]
    fn test_tilde_name_is_literal() {
        let expander = PathExpander::new("/home/tester");
        assert_eq!(expander.expand("~backup"), PathBuf::from("~backup"));
    }

    #[test]
    fn test_plain_path_untouched() {
        let expander = PathExpander::new("/home/tester");
        assert_eq!(expander.expand("a/b"), PathBuf::from("a/b"));
        assert_eq!(expander.home_dir(), Path::new("/home/tester"));
    }
}
