use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::{ROOT, classify, is_markup, is_stylesheet};
use crate::codec::Codec;
use crate::container::reader::read_entries;
use crate::container::writer::{OutputArchive, WriteOptions};
use crate::domain::{ArchiveEntry, TransformedEntry};
use crate::error::Result;
use crate::pack::walker::entries_from_dir;
use crate::policy::Policy;
use crate::report::{ReorgReport, ReportRow, digest};
use crate::rewrite::{rewrite_markup_bytes, rewrite_stylesheet_bytes};
use crate::util::path::{base_name, extension};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorgOptions {
    /// Fixed entry timestamps, so equal input gives byte-equal output.
    pub deterministic: bool,
    pub codec: Codec,
    /// Password for encrypted input entries. Never persisted.
    #[serde(skip)]
    pub password: Option<String>,
    pub policy: Policy,
}

impl ReorgOptions {
    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            deterministic: self.deterministic,
            codec: self.codec,
        }
    }
}

#[derive(Debug)]
pub struct Reorganized {
    pub archive: Vec<u8>,
    pub report: ReorgReport,
}

/// Reorganize a zip with default options and return the new zip.
pub fn reorganize(input: &[u8]) -> Result<Vec<u8>> {
    Ok(reorganize_with(input, &ReorgOptions::default())?.archive)
}

pub fn reorganize_with(input: &[u8], opts: &ReorgOptions) -> Result<Reorganized> {
    let entries = read_entries(input, opts.password.as_deref(), &opts.policy)?;
    finish(entries, opts)
}

/// Reorganize an unpacked site directory into a zip.
pub fn reorganize_dir(root: &Path, opts: &ReorgOptions) -> Result<Reorganized> {
    let entries = entries_from_dir(root, &opts.policy)?;
    finish(entries, opts)
}

/// Dry run: report where every entry would go without building a zip.
pub fn plan(input: &[u8], opts: &ReorgOptions) -> Result<ReorgReport> {
    let entries = read_entries(input, opts.password.as_deref(), &opts.policy)?;
    Ok(sort_entries(entries).1)
}

/// [`plan`] over an unpacked site directory.
pub fn plan_dir(root: &Path, opts: &ReorgOptions) -> Result<ReorgReport> {
    let entries = entries_from_dir(root, &opts.policy)?;
    Ok(sort_entries(entries).1)
}

fn finish(entries: Vec<ArchiveEntry>, opts: &ReorgOptions) -> Result<Reorganized> {
    let (out, report) = sort_entries(entries);
    let archive = out.finish(&opts.write_options())?;
    info!(
        files = report.entries.len(),
        rewritten = report.rewritten_count(),
        collisions = report.collisions.len(),
        bytes = archive.len(),
        "archive reorganized"
    );
    Ok(Reorganized { archive, report })
}

fn sort_entries(entries: Vec<ArchiveEntry>) -> (OutputArchive, ReorgReport) {
    let mut out = OutputArchive::new();
    let mut report = ReorgReport::default();

    for entry in entries {
        if entry.is_dir {
            report.skipped_dirs += 1;
            continue;
        }
        let source = entry.name.clone();
        let Some(t) = transform_entry(entry) else {
            warn!(%source, "entry has no file name; dropped");
            continue;
        };
        debug!(%source, output = %t.output_name, rewritten = t.rewritten, "entry");

        report.entries.push(ReportRow {
            source: source.clone(),
            folder: t
                .output_name
                .rsplit_once('/')
                .map(|(folder, _)| format!("{folder}/"))
                .unwrap_or_else(|| ROOT.to_string()),
            output: t.output_name.clone(),
            rewritten: t.rewritten,
            size: t.content.len() as u64,
            blake3: digest(&t.content),
        });

        let output = t.output_name.clone();
        if out.add(t) {
            warn!(%source, %output, "output name already taken; keeping the later file");
        }
    }

    report.collisions = out.collisions().to_vec();
    (out, report)
}

/// Flatten, classify, and rewrite a single file entry. `None` for
/// directories and names without a file component.
pub fn transform_entry(entry: ArchiveEntry) -> Option<TransformedEntry> {
    if entry.is_dir {
        return None;
    }
    let name = base_name(&entry.name);
    if name.is_empty() {
        return None;
    }
    let ext = extension(name);
    let folder = classify(&ext);
    let output_name = format!("{folder}{name}");

    let rewrite: Option<fn(&[u8]) -> Vec<u8>> = if is_markup(&ext) {
        Some(rewrite_markup_bytes as fn(&[u8]) -> Vec<u8>)
    } else if is_stylesheet(&ext) {
        Some(rewrite_stylesheet_bytes as fn(&[u8]) -> Vec<u8>)
    } else {
        None
    };

    let new_text = rewrite.and_then(|f| {
        let new = f(&entry.content);
        (new != entry.content).then_some(new)
    });
    let rewritten = new_text.is_some();
    let content = new_text.unwrap_or(entry.content);

    Some(TransformedEntry {
        output_name,
        content,
        rewritten,
    })
}
