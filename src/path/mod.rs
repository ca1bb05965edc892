mod expander;

pub use expander::PathExpander;

use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPolicy {
    Session,
    ProcessDir,
}

// lexical only; `..` stops at the root
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

pub fn resolve_against(base: &Path, arg: &Path) -> PathBuf {
    if arg.is_absolute() {
        normalize(arg)
    } else {
        normalize(&base.join(arg))
    }
}

pub fn resolve(
    expander: &PathExpander,
    session_dir: &Path,
    arg: &str,
    policy: PathPolicy,
) -> io::Result<PathBuf> {
    let expanded = expander.expand(arg);
    match policy {
        PathPolicy::Session => Ok(resolve_against(session_dir, &expanded)),
        PathPolicy::ProcessDir => {
            let cwd = std::env::current_dir()?;
            Ok(resolve_against(&cwd, &expanded))
        }
    }
}
