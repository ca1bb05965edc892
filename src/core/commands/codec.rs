use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tokio::io::AsyncWrite;
use tracing::debug;

use super::files::{file_name, prepare_target, CHUNK_SIZE};
use super::{io_error, say, CommandError};

// brotli stream under a `.gz` name
const SUFFIX: &str = ".gz";

const BROTLI_BUFFER: usize = 4096;
const BROTLI_QUALITY: u32 = 6;
const BROTLI_LG_WINDOW: u32 = 22;

pub(super) async fn compress<W>(source: &Path, dest_dir: &Path, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let mut name = file_name(source)?.to_os_string();
    name.push(SUFFIX);
    let target = prepare_target(source, dest_dir, &name).await?;

    let (src, dst) = (source.to_path_buf(), target.clone());
    tokio::task::spawn_blocking(move || compress_file(&src, &dst)).await??;

    debug!(from = %source.display(), to = %target.display(), "compressed");
    say(out, "file compressed!").await
}

pub(super) async fn decompress<W>(
    source: &Path,
    dest_dir: &Path,
    out: &mut W,
) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let name = stripped_name(source)?;
    let target = prepare_target(source, dest_dir, &name).await?;

    let (src, dst) = (source.to_path_buf(), target.clone());
    tokio::task::spawn_blocking(move || decompress_file(&src, &dst)).await??;

    debug!(from = %source.display(), to = %target.display(), "decompressed");
    say(out, "file decompressed!").await
}

// Drops a trailing `.gz` when there is one; other names are kept as they are.
fn stripped_name(source: &Path) -> Result<OsString, CommandError> {
    let name = file_name(source)?.to_string_lossy().into_owned();
    let stem = match name.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name.as_str(),
    };
    Ok(OsString::from(stem))
}

fn compress_file(source: &Path, target: &Path) -> Result<(), CommandError> {
    let mut reader = File::open(source).map_err(io_error("open", source))?;
    let writer = File::create(target).map_err(io_error("open", target))?;

    let mut encoder = brotli::CompressorWriter::new(
        BufWriter::new(writer),
        BROTLI_BUFFER,
        BROTLI_QUALITY,
        BROTLI_LG_WINDOW,
    );
    transfer(&mut reader, source, &mut encoder, target)?;

    // into_inner finishes the brotli stream before handing the file back
    let writer = encoder.into_inner();
    finish(writer, target)
}

fn decompress_file(source: &Path, target: &Path) -> Result<(), CommandError> {
    let reader = File::open(source).map_err(io_error("open", source))?;
    let writer = File::create(target).map_err(io_error("open", target))?;

    let mut decoder = brotli::Decompressor::new(BufReader::new(reader), BROTLI_BUFFER);
    let mut writer = BufWriter::new(writer);
    transfer(&mut decoder, source, &mut writer, target)?;
    finish(writer, target)
}

fn transfer<R: Read, W: Write>(
    reader: &mut R,
    source: &Path,
    writer: &mut W,
    target: &Path,
) -> Result<u64, CommandError> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(io_error("read", source)(err)),
        };
        writer
            .write_all(&buf[..n])
            .map_err(io_error("write", target))?;
        total += n as u64;
    }
    writer.flush().map_err(io_error("write", target))?;
    Ok(total)
}

fn finish(writer: BufWriter<File>, target: &Path) -> Result<(), CommandError> {
    let file = writer
        .into_inner()
        .map_err(|err| io_error("write", target)(err.into_error()))?;
    file.sync_all().map_err(io_error("write", target))
}
