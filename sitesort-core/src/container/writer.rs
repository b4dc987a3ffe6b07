use std::collections::HashMap;
use std::io::{Cursor, Write};

use time::OffsetDateTime;
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipWriter};

use crate::codec::Codec;
use crate::domain::TransformedEntry;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default)]
pub struct WriteOptions {
    /// Stamp every entry with the DOS epoch so equal input gives equal bytes.
    pub deterministic: bool,
    pub codec: Codec,
}

/// Ordered set of output entries, finalized once into zip bytes.
///
/// Adding a name that is already present replaces its content in place
/// (last write wins) and records the name as a collision.
#[derive(Debug, Default)]
pub struct OutputArchive {
    entries: Vec<TransformedEntry>,
    by_name: HashMap<String, usize>,
    collisions: Vec<String>,
}

impl OutputArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when an earlier entry of the same name was replaced.
    pub fn add(&mut self, entry: TransformedEntry) -> bool {
        match self.by_name.get(&entry.output_name) {
            Some(&idx) => {
                if !self.collisions.contains(&entry.output_name) {
                    self.collisions.push(entry.output_name.clone());
                }
                self.entries[idx] = entry;
                true
            }
            None => {
                self.by_name
                    .insert(entry.output_name.clone(), self.entries.len());
                self.entries.push(entry);
                false
            }
        }
    }

    pub fn entries(&self) -> &[TransformedEntry] {
        &self.entries
    }

    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self, opts: &WriteOptions) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(opts.codec.method())
            .last_modified_time(stamp(opts.deterministic));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for e in &self.entries {
            zip.start_file(e.output_name.as_str(), options)?;
            zip.write_all(&e.content)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

fn stamp(deterministic: bool) -> DateTime {
    if deterministic {
        return DateTime::default();
    }
    let now = OffsetDateTime::now_utc();
    DateTime::from_date_and_time(
        now.year().clamp(1980, 2107) as u16,
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::reader::read_entries;
    use crate::policy::Policy;

    fn entry(name: &str, content: &[u8]) -> TransformedEntry {
        TransformedEntry {
            output_name: name.to_string(),
            content: content.to_vec(),
            rewritten: false,
        }
    }

    #[test]
    fn last_write_wins_in_first_position() {
        let mut out = OutputArchive::new();
        assert!(!out.add(entry("img/a.png", b"first")));
        assert!(!out.add(entry("js/b.js", b"b")));
        assert!(out.add(entry("img/a.png", b"second")));
        assert!(out.add(entry("img/a.png", b"third")));

        assert_eq!(out.len(), 2);
        assert_eq!(out.entries()[0].content, b"third");
        assert_eq!(out.collisions(), ["img/a.png".to_string()]);
    }

    #[test]
    fn finish_produces_readable_zip() {
        for codec in [Codec::Store, Codec::Deflate, Codec::Zstd] {
            let mut out = OutputArchive::new();
            out.add(entry("index.html", b"<p>hi</p>"));
            out.add(entry("img/a.png", &[0x89, b'P', b'N', b'G', 0, 0xff]));
            let bytes = out
                .finish(&WriteOptions {
                    deterministic: true,
                    codec,
                })
                .unwrap();

            let back = read_entries(&bytes, None, &Policy::default()).unwrap();
            let names: Vec<_> = back.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, ["index.html", "img/a.png"], "{codec}");
            assert_eq!(back[1].content, [0x89, b'P', b'N', b'G', 0, 0xff]);
        }
    }

    #[test]
    fn deterministic_output_is_stable() {
        let build = || {
            let mut out = OutputArchive::new();
            out.add(entry("css/a.css", b"a{}"));
            out.finish(&WriteOptions {
                deterministic: true,
                codec: Codec::Deflate,
            })
            .unwrap()
        };
        assert_eq!(build(), build());
    }
}
