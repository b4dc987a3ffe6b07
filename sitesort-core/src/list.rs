use serde::Serialize;
use std::io::Cursor;
use zip::ZipArchive;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub name: String,
    pub size: u64,
    pub compressed: u64,
    pub is_dir: bool,
}

/// Enumerate entries without decompressing them; works on encrypted
/// archives too.
pub fn list(input: &[u8]) -> Result<Vec<EntryRow>> {
    let mut archive = ZipArchive::new(Cursor::new(input))?;
    let mut rows = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let f = archive.by_index_raw(i)?;
        rows.push(EntryRow {
            name: f.name().to_string(),
            size: f.size(),
            compressed: f.compressed_size(),
            is_dir: f.is_dir(),
        });
    }
    Ok(rows)
}
