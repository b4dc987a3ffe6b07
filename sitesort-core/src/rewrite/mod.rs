//! Reference rewriting for markup and stylesheets.
//!
//! Both scanners share [`relocate`]: a reference keeps its query and
//! fragment, loses its directories, and gains the folder its file was
//! moved to, spelled relative to the folder of the document holding it.

pub mod markup;
pub mod stylesheet;

pub use markup::{rewrite_markup, rewrite_markup_bytes};
pub use stylesheet::{rewrite_stylesheet, rewrite_stylesheet_bytes};

use crate::classify::{ROOT, classify, is_markup};
use crate::util::path::{base_name, extension};

/// New spelling of `reference` as seen from a document stored in `from`
/// (a folder label such as `css/`, or root). `None` means keep it as is:
/// external, fragment-only, unrecognized, or already correct.
pub fn relocate(reference: &str, from: &str) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || is_external(trimmed) {
        return None;
    }

    let split = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let (path, suffix) = trimmed.split_at(split);
    let name = base_name(path);
    if name.is_empty() {
        return None;
    }
    let ext = extension(name);
    let folder = classify(&ext);
    if folder == ROOT && !is_markup(&ext) {
        return None;
    }

    let target = if path.starts_with('/') {
        format!("/{folder}{name}")
    } else if folder == from {
        name.to_string()
    } else if from == ROOT {
        format!("{folder}{name}")
    } else {
        format!("../{folder}{name}")
    };

    let lead = reference.len() - reference.trim_start().len();
    let tail = lead + trimmed.len();
    let rewritten = format!(
        "{}{target}{suffix}{}",
        &reference[..lead],
        &reference[tail..]
    );
    (rewritten != reference).then_some(rewritten)
}

/// `//host/...` or anything carrying a URL scheme (`https:`, `data:`,
/// `mailto:`...).
fn is_external(reference: &str) -> bool {
    if reference.starts_with("//") {
        return true;
    }
    let mut chars = reference.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for (_, c) in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}

/// Copies `src` to a new buffer while replacing selected byte ranges.
/// Ranges must be handed in ascending, non-overlapping order. Bytes outside
/// the replaced ranges are copied as they are, valid UTF-8 or not.
pub(crate) struct Splicer<'a> {
    src: &'a [u8],
    out: Vec<u8>,
    cursor: usize,
}

impl<'a> Splicer<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            out: Vec::with_capacity(src.len()),
            cursor: 0,
        }
    }

    pub(crate) fn replace(&mut self, start: usize, end: usize, with: &[u8]) {
        debug_assert!(self.cursor <= start && start <= end);
        self.out.extend_from_slice(&self.src[self.cursor..start]);
        self.out.extend_from_slice(with);
        self.cursor = end;
    }

    /// Replace `src[start..end]` if it is a relocatable reference. Spans
    /// that are not UTF-8 are never references we can classify.
    pub(crate) fn relocate(&mut self, start: usize, end: usize, from: &str) {
        let Ok(reference) = std::str::from_utf8(&self.src[start..end]) else {
            return;
        };
        if let Some(new) = relocate(reference, from) {
            self.replace(start, end, new.as_bytes());
        }
    }

    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.out.extend_from_slice(&self.src[self.cursor..]);
        self.out
    }
}

/// Back to `String` for the `&str` entry points. Splicing only ever cuts at
/// ASCII delimiters, so UTF-8 input stays UTF-8.
pub(crate) fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Byte-level helpers shared by both scanners. All delimiters searched for
/// are ASCII, so on UTF-8 input every returned index is a char boundary.
pub(crate) mod scan {
    pub fn starts_with_ci(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
    }

    pub fn find_ci(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
        if from > haystack.len() {
            return None;
        }
        haystack[from..]
            .windows(needle.len())
            .position(|w| w.eq_ignore_ascii_case(needle))
            .map(|p| from + p)
    }

    pub fn find_byte(haystack: &[u8], from: usize, needle: u8) -> Option<usize> {
        haystack
            .get(from..)?
            .iter()
            .position(|&b| b == needle)
            .map(|p| from + p)
    }

    pub fn trim_end(bytes: &[u8], start: usize, mut end: usize) -> usize {
        while end > start && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        end
    }

    pub fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    }

    /// Index of the quote closing the string opened at `open`, honouring
    /// backslash escapes.
    pub fn string_end(bytes: &[u8], open: usize) -> Option<usize> {
        let quote = bytes[open];
        let mut i = open + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return Some(i),
                _ => i += 1,
            }
        }
        None
    }
}
