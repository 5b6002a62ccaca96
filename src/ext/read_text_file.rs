use std::{io::Cursor, path::Path};

use compio::{fs::File, io::AsyncReadExt, io::BufReader};
use tracing::debug;

/// Reads a whole UTF-8 file through the compio runtime.
pub async fn read_text_file(path: &Path) -> std::io::Result<String> {
    debug!("Opening file: {}", path.display());
    let file = File::open(path).await?;

    let mut reader = BufReader::new(Cursor::new(file));
    let res = reader.read_to_string(String::new()).await;
    let bytes = res.0?;
    debug!("Read {bytes} bytes from {}", path.display());
    Ok(res.1)
}
