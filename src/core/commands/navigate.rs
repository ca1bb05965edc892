use std::fmt;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use super::{io_error, CommandError};
use crate::core::session::Session;
use crate::core::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => f.write_str("directory"),
            EntryKind::File => f.write_str("file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

// the root is its own parent
pub(super) fn up(session: &mut Session) {
    if let Some(parent) = session.current_dir().parent().map(Path::to_path_buf) {
        session.set_current_dir(parent);
    }
}

pub(super) async fn cd(session: &mut Session, target: PathBuf) -> Result<(), CommandError> {
    let metadata = fs::metadata(&target)
        .await
        .map_err(io_error("stat", &target))?;
    if !metadata.is_dir() {
        return Err(CommandError::NotADirectory(target));
    }
    session.set_current_dir(target);
    Ok(())
}

pub async fn list_dir(dir: &Path) -> Result<Vec<Entry>, CommandError> {
    let mut reader = fs::read_dir(dir).await.map_err(io_error("scandir", dir))?;
    let mut directories = Vec::new();
    let mut files = Vec::new();

    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(io_error("scandir", dir))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_dir() => directories.push(name),
            Ok(metadata) if metadata.is_file() => files.push(name),
            Ok(_) => trace!(path = %path.display(), "skipping special file"),
            Err(err) => trace!(path = %path.display(), error = %err, "skipping unreadable entry"),
        }
    }

    directories.sort();
    files.sort();

    let directories = directories.into_iter().map(|name| Entry {
        name,
        kind: EntryKind::Directory,
    });
    let files = files.into_iter().map(|name| Entry {
        name,
        kind: EntryKind::File,
    });
    Ok(directories.chain(files).collect())
}

pub(super) async fn ls<W>(session: &Session, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let entries = list_dir(session.current_dir()).await?;

    let mut table = Table::new(["Name", "Type"]);
    for entry in &entries {
        table.push_row([entry.name.clone(), entry.kind.to_string()]);
    }

    out.write_all(table.render().as_bytes())
        .await
        .map_err(CommandError::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session_in(dir: &Path) -> Session {
        Session::with_home(None, dir)
    }

    #[test]
    fn test_up_moves_to_parent_without_checking() {
        let mut session = session_in(Path::new("/no/such/place"));
        up(&mut session);
        assert_eq!(session.current_dir(), Path::new("/no/such"));
    }

    #[test]
    fn test_up_at_root_stays() {
        let mut session = session_in(Path::new("/"));
        up(&mut session);
        assert_eq!(session.current_dir(), Path::new("/"));
    }

    #[tokio::test]
    async fn test_cd_into_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        let mut session = session_in(temp.path());

        cd(&mut session, temp.path().join("sub")).await.unwrap();
        assert_eq!(session.current_dir(), temp.path().join("sub"));
    }

    #[tokio::test]
    async fn test_cd_into_file_fails_and_keeps_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("plain.txt"), "x").unwrap();
        let mut session = session_in(temp.path());

        let result = cd(&mut session, temp.path().join("plain.txt")).await;
        assert!(matches!(result, Err(CommandError::NotADirectory(_))));
        assert_eq!(session.current_dir(), temp.path());
    }

    #[tokio::test]
    async fn test_cd_missing_fails_and_keeps_dir() {
        let temp = TempDir::new().unwrap();
        let mut session = session_in(temp.path());

        let result = cd(&mut session, temp.path().join("missing")).await;
        assert!(matches!(result, Err(CommandError::Io { op: "stat", .. })));
        assert_eq!(session.current_dir(), temp.path());
    }

    #[tokio::test]
    async fn test_list_dir_orders_directories_before_files() {
        let temp = TempDir::new().unwrap();
        for dir in ["zeta", "Alpha", "beta"] {
            std::fs::create_dir(temp.path().join(dir)).unwrap();
        }
        for file in ["b.txt", "B.txt", "a.txt"] {
            std::fs::write(temp.path().join(file), "").unwrap();
        }

        let entries = list_dir(temp.path()).await.unwrap();
        let listed: Vec<(&str, EntryKind)> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.kind))
            .collect();

        assert_eq!(
            listed,
            vec![
                ("Alpha", EntryKind::Directory),
                ("beta", EntryKind::Directory),
                ("zeta", EntryKind::Directory),
                ("B.txt", EntryKind::File),
                ("a.txt", EntryKind::File),
                ("b.txt", EntryKind::File),
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_dir_skips_broken_symlinks() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("real.txt"), "").unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("dangling"))
            .unwrap();

        let entries = list_dir(temp.path()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "real.txt");
    }

    #[tokio::test]
    async fn test_ls_renders_table() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("README"), "").unwrap();
        let session = session_in(temp.path());

        let mut out = Vec::new();
        ls(&session, &mut out).await.unwrap();
        let rendered = String::from_utf8(out).unwrap();

        assert!(rendered.contains("│ 0       │ src    │ directory │"));
        assert!(rendered.contains("│ 1       │ README │ file      │"));
    }
}
