use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sitesort_core::classify::{is_markup, is_stylesheet};
use sitesort_core::util::path::extension;
use sitesort_core::{
    Reorganized, list, plan, plan_dir, reorganize_dir, reorganize_with, rewrite_markup_bytes,
    rewrite_stylesheet_bytes,
};
use tracing::info;

use crate::config::{Overrides, load_options};
use crate::presentation::cli::Kind;

fn read_input(input: &Path) -> Result<Vec<u8>> {
    fs::read(input).with_context(|| format!("reading {}", input.display()))
}

pub fn handle_reorganize(
    input: PathBuf,
    out: PathBuf,
    overrides: Overrides,
    config: Option<PathBuf>,
    report: bool,
) -> Result<()> {
    let mut opts = load_options(config.as_deref())?;
    overrides.apply(&mut opts);

    let Reorganized {
        archive,
        report: summary,
    } = if input.is_dir() {
        reorganize_dir(&input, &opts)?
    } else {
        reorganize_with(&read_input(&input)?, &opts)?
    };

    fs::write(&out, &archive).with_context(|| format!("writing {}", out.display()))?;
    info!(
        "reorganize: {} -> {} ({} files, {} rewritten)",
        input.display(),
        out.display(),
        summary.entries.len(),
        summary.rewritten_count()
    );

    if report {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &summary)?;
        writeln!(stdout)?;
    }
    Ok(())
}

pub fn handle_plan(
    input: PathBuf,
    password: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut opts = load_options(config.as_deref())?;
    Overrides {
        password,
        ..Default::default()
    }
    .apply(&mut opts);

    let report = if input.is_dir() {
        plan_dir(&input, &opts)?
    } else {
        plan(&read_input(&input)?, &opts)?
    };
    let mut stdout = std::io::stdout().lock();
    for row in &report.entries {
        let mark = if row.rewritten { "  (rewritten)" } else { "" };
        writeln!(stdout, "{} -> {}{}", row.source, row.output, mark)?;
    }
    for name in &report.collisions {
        writeln!(stdout, "collision: {name} (last file wins)")?;
    }
    Ok(())
}

pub fn handle_list(archive: PathBuf) -> Result<()> {
    let rows = list(&read_input(&archive)?)?;
    let mut stdout = std::io::stdout().lock();
    for r in rows {
        if r.is_dir {
            writeln!(stdout, "{:>12}  {:>12}  {}", "-", "-", r.name)?;
        } else {
            writeln!(stdout, "{:>12}  {:>12}  {}", r.size, r.compressed, r.name)?;
        }
    }
    Ok(())
}

fn infer_kind(file: &Path) -> Result<Kind> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = extension(&name);
    if is_markup(&ext) {
        Ok(Kind::Html)
    } else if is_stylesheet(&ext) {
        Ok(Kind::Css)
    } else {
        bail!("cannot tell whether {} is HTML or CSS; pass --kind", file.display())
    }
}

pub fn handle_rewrite(file: PathBuf, kind: Option<Kind>) -> Result<()> {
    let kind = match kind {
        Some(k) => k,
        None => infer_kind(&file)?,
    };
    let src = read_input(&file)?;
    let rewritten = match kind {
        Kind::Html => rewrite_markup_bytes(&src),
        Kind::Css => rewrite_stylesheet_bytes(&src),
    };
    std::io::stdout().lock().write_all(&rewritten)?;
    Ok(())
}
