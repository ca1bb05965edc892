use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::os::LINE_ENDING;
use super::{io_error, say, CommandError};

pub(crate) const CHUNK_SIZE: usize = 64 * 1024;

pub(crate) async fn pump<R, W, F>(
    reader: &mut R,
    source: &Path,
    writer: &mut W,
    on_write: F,
) -> Result<u64, CommandError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Fn(io::Error) -> CommandError,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = reader
            .read(&mut buf)
            .await
            .map_err(io_error("read", source))?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await.map_err(&on_write)?;
        total += n as u64;
    }
    writer.flush().await.map_err(&on_write)?;
    Ok(total)
}

pub(crate) fn file_name(path: &Path) -> Result<&OsStr, CommandError> {
    path.file_name()
        .ok_or_else(|| CommandError::InvalidName(path.display().to_string()))
}

// Refuses `dest_dir/name` when it is the source itself, including through an
// existing symlink or hard link at that name.
pub(crate) async fn prepare_target(
    source: &Path,
    dest_dir: &Path,
    name: &OsStr,
) -> Result<PathBuf, CommandError> {
    let canonical_source = fs::canonicalize(source)
        .await
        .map_err(io_error("stat", source))?;
    let canonical_dir = fs::canonicalize(dest_dir)
        .await
        .map_err(io_error("stat", dest_dir))?;
    if canonical_dir.join(name) == canonical_source {
        return Err(CommandError::SameFile(source.to_path_buf()));
    }

    let target = dest_dir.join(name);
    if let Ok(existing) = fs::metadata(&target).await {
        let source_meta = fs::metadata(source)
            .await
            .map_err(io_error("stat", source))?;
        let resolves_to_source = fs::canonicalize(&target)
            .await
            .is_ok_and(|canonical| canonical == canonical_source);
        if resolves_to_source || same_inode(&source_meta, &existing) {
            return Err(CommandError::SameFile(source.to_path_buf()));
        }
    }
    Ok(target)
}

#[cfg(unix)]
fn same_inode(a: &std::fs::Metadata, b: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_inode(_a: &std::fs::Metadata, _b: &std::fs::Metadata) -> bool {
    false
}

pub(super) async fn cat<W>(path: &Path, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let mut file = File::open(path).await.map_err(io_error("open", path))?;
    pump(&mut file, path, out, CommandError::Output).await?;
    out.write_all(LINE_ENDING.as_bytes())
        .await
        .map_err(CommandError::Output)
}

pub(super) async fn add<W>(path: &Path, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(io_error("create", path))?;
    say(out, "File created!").await
}

pub(super) async fn rename<W>(file: &Path, new_name: &str, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let name = Path::new(new_name)
        .file_name()
        .ok_or_else(|| CommandError::InvalidName(new_name.to_string()))?;
    let parent = file
        .parent()
        .ok_or_else(|| CommandError::InvalidName(file.display().to_string()))?;
    let target = parent.join(name);

    fs::rename(file, &target)
        .await
        .map_err(io_error("rename", file))?;
    debug!(from = %file.display(), to = %target.display(), "renamed");
    say(out, "File renamed!").await
}

pub(super) async fn copy(source: &Path, dest_dir: &Path) -> Result<(), CommandError> {
    let target = prepare_target(source, dest_dir, file_name(source)?).await?;
    let mut reader = File::open(source).await.map_err(io_error("open", source))?;
    let mut writer = File::create(&target)
        .await
        .map_err(io_error("open", &target))?;

    let bytes = tokio::io::copy(&mut reader, &mut writer)
        .await
        .map_err(io_error("copy", &target))?;
    writer.flush().await.map_err(io_error("write", &target))?;
    debug!(from = %source.display(), to = %target.display(), bytes, "copied");
    Ok(())
}

// the source is removed only after the copy is synced
pub(super) async fn move_file<W>(
    source: &Path,
    dest_dir: &Path,
    out: &mut W,
) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let target = prepare_target(source, dest_dir, file_name(source)?).await?;
    {
        let mut reader = File::open(source).await.map_err(io_error("open", source))?;
        let mut writer = File::create(&target)
            .await
            .map_err(io_error("open", &target))?;

        let write_target = target.clone();
        pump(&mut reader, source, &mut writer, move |err| {
            io_error("write", &write_target)(err)
        })
        .await?;
        writer.sync_all().await.map_err(io_error("write", &target))?;
    }

    fs::remove_file(source)
        .await
        .map_err(io_error("remove", source))?;
    debug!(from = %source.display(), to = %target.display(), "moved");
    say(out, "File moved!").await
}

pub(super) async fn remove<W>(path: &Path, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    fs::remove_file(path)
        .await
        .map_err(io_error("remove", path))?;
    say(out, "File deleted!").await
}
