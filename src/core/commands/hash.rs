use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::files::CHUNK_SIZE;
use super::os::LINE_ENDING;
use super::{io_error, CommandError};

pub async fn digest_file(path: &Path) -> Result<String, CommandError> {
    let mut file = File::open(path).await.map_err(io_error("open", path))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).await.map_err(io_error("read", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

pub(super) async fn hash<W>(path: &Path, out: &mut W) -> Result<(), CommandError>
where
    W: AsyncWrite + Unpin + Send,
{
    let digest = digest_file(path).await?;
    out.write_all(format!("{digest}{LINE_ENDING}").as_bytes())
        .await
        .map_err(CommandError::Output)
}
