use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::domain::ArchiveEntry;
use crate::error::{ArchiveError, Result};
use crate::policy::Policy;

/// Read every entry of a zip held in memory, in archive order.
///
/// Directory entries are returned with `is_dir` set and no content. When
/// `password` is given it is used for encrypted entries; plain entries read
/// as usual.
pub fn read_entries(
    input: &[u8],
    password: Option<&str>,
    policy: &Policy,
) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(input))?;
    policy.check_entries(archive.len() as u64)?;

    let mut entries = Vec::with_capacity(archive.len());
    let mut total = 0u64;
    for i in 0..archive.len() {
        let file = match password {
            Some(pw) => archive.by_index_decrypt(i, pw.as_bytes()),
            None => archive.by_index(i),
        };
        let mut file = file.map_err(password_aware)?;
        let name = file.name().to_string();
        if file.is_dir() {
            entries.push(ArchiveEntry::dir(name));
            continue;
        }

        policy.check_uncompressed(total.saturating_add(file.size()))?;
        // Declared sizes can lie; never read past the remaining budget.
        let budget = policy
            .max_uncompressed
            .map(|max| max.saturating_sub(total).saturating_add(1))
            .unwrap_or(u64::MAX);
        let mut content = Vec::with_capacity(file.size().min(1 << 20) as usize);
        (&mut file).take(budget).read_to_end(&mut content)?;
        total = total.saturating_add(content.len() as u64);
        policy.check_uncompressed(total)?;

        entries.push(ArchiveEntry::file(name, content));
    }
    Ok(entries)
}

fn password_aware(e: ZipError) -> ArchiveError {
    let msg = e.to_string();
    if msg.to_ascii_lowercase().contains("password") {
        ArchiveError::Password(msg)
    } else {
        e.into()
    }
}
