//! Text I/O shared by the instance reader and the model codec.
use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use tempfile::NamedTempFile;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::Result;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];


/// Opens `path` for buffered reading.
/// Gzip-compressed files are decompressed transparently;
/// the compression is detected from the magic bytes, not the extension.
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        let decoder = MultiGzDecoder::new(reader);
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(reader))
    }
}


/// Returns `true` if `path` has the `.gz` extension.
pub fn is_gzip_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .is_some_and(|ext| ext == "gz")
}


/// Writes a file through `write` and moves it to `path` only
/// after everything has been flushed.
/// The content goes to a temporary file in the destination directory first,
/// so a failure never leaves a truncated file at `path`.
/// If `path` ends with `.gz`, the content is gzip-compressed.
pub fn write_atomic<P, F>(path: P, write: F) -> Result<()>
    where P: AsRef<Path>,
          F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let dir = path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        if is_gzip_path(path) {
            let mut encoder = GzEncoder::new(out, Compression::default());
            write(&mut encoder)?;
            let mut out = encoder.finish()?;
            out.flush()?;
        } else {
            write(&mut out)?;
            out.flush()?;
        }
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    Ok(())
}
