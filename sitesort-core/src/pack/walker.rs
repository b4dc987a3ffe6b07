use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::domain::ArchiveEntry;
use crate::error::Result;
use crate::policy::Policy;

/// Collect the files under `root` as archive entries named relative to it,
/// `/`-separated, in sorted walk order. Symlinks are not followed.
pub fn entries_from_dir(root: &Path, policy: &Policy) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    let mut total = 0u64;
    for e in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let e = e.map_err(std::io::Error::from)?;
        if !e.file_type().is_file() {
            continue;
        }
        let rel = e.path().strip_prefix(root).unwrap_or(e.path());
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        policy.check_entries(entries.len() as u64 + 1)?;
        let content = fs::read(e.path())?;
        total = total.saturating_add(content.len() as u64);
        policy.check_uncompressed(total)?;

        entries.push(ArchiveEntry::file(name, content));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArchiveError;

    #[test]
    fn walks_files_sorted_with_relative_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets/css")).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("index.html"), "<p></p>").unwrap();
        fs::write(dir.path().join("assets/css/main.css"), "a{}").unwrap();

        let entries = entries_from_dir(dir.path(), &Policy::default()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["assets/css/main.css", "index.html"]);
        assert!(entries.iter().all(|e| !e.is_dir));
        assert_eq!(entries[0].content, b"a{}");
    }

    #[test]
    fn honours_entry_limit() {
        let dir = tempfile::tempdir().unwrap();
        for n in ["a.js", "b.js", "c.js"] {
            fs::write(dir.path().join(n), "x").unwrap();
        }
        let policy = Policy {
            max_entries: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            entries_from_dir(dir.path(), &policy),
            Err(ArchiveError::Policy(_))
        ));
    }
}
