// ABOUTME: Unpacks a downloaded container archive into a caller's sink.
// ABOUTME: Regular-file entries are copied in archive order; directories and links are skipped.

use std::io::{self, Read, Write};

/// Copy the content of every regular file in the tar `archive` into `sink`.
///
/// Returns the number of bytes written. A single-file archive yields that
/// file's bytes; a directory archive yields its files concatenated. The
/// archive is decoded in full before the first write, so a corrupt or
/// truncated archive leaves `sink` untouched.
pub(crate) fn untar_into<R: Read, W: Write + ?Sized>(archive: R, sink: &mut W) -> io::Result<u64> {
    let mut archive = tar::Archive::new(archive);
    let mut content = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        entry.read_to_end(&mut content)?;
    }

    sink.write_all(&content)?;
    sink.flush()?;
    Ok(content.len() as u64)
}
