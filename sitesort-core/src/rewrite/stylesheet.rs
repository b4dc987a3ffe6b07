use super::scan::{find_byte, find_ci, skip_ws, starts_with_ci, string_end, trim_end};
use super::{Splicer, into_text};
use crate::classify::CSS_FOLDER;

/// Quote characters as they appear entity-encoded inside an HTML `style`
/// attribute.
const ENTITY_QUOTES: &[&[u8]] = &[
    b"&quot;", b"&#34;", b"&#x22;", b"&#39;", b"&#x27;", b"&apos;",
];

/// Rewrite `url(...)` and `@import` targets of a stylesheet that lives in
/// the `css/` folder.
pub fn rewrite_stylesheet(text: &str) -> String {
    into_text(rewrite_stylesheet_bytes(text.as_bytes()))
}

/// [`rewrite_stylesheet`] for sheets in any encoding with ASCII-compatible
/// punctuation. Bytes that are not UTF-8 are copied through.
pub fn rewrite_stylesheet_bytes(src: &[u8]) -> Vec<u8> {
    rewrite_stylesheet_in(src, CSS_FOLDER)
}

/// Same as [`rewrite_stylesheet_bytes`] for CSS held by a document in
/// `from` (inline `<style>` blocks and `style` attributes use root).
pub fn rewrite_stylesheet_in(bytes: &[u8], from: &str) -> Vec<u8> {
    let mut out = Splicer::new(bytes);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => match find_ci(bytes, i + 2, b"*/") {
                Some(end) => i = end + 2,
                None => break,
            },
            b'"' | b'\'' => match string_end(bytes, i) {
                Some(end) => i = end + 1,
                None => break,
            },
            b'@' if starts_with_ci(&bytes[i + 1..], b"import") => {
                let j = skip_ws(bytes, i + 7);
                match bytes.get(j) {
                    Some(b'"' | b'\'') => {
                        let Some(end) = string_end(bytes, j) else {
                            break;
                        };
                        out.relocate(j + 1, end, from);
                        i = end + 1;
                    }
                    // `@import url(...)` is picked up by the url arm.
                    _ => i = j,
                }
            }
            b'u' | b'U' if is_url_open(bytes, i) => {
                let j = skip_ws(bytes, i + 4);
                match bytes.get(j) {
                    Some(b'"' | b'\'') => {
                        let Some(end) = string_end(bytes, j) else {
                            break;
                        };
                        out.relocate(j + 1, end, from);
                        i = end + 1;
                    }
                    _ => {
                        let Some(close) = find_byte(bytes, j, b')') else {
                            break;
                        };
                        let (start, end) = unquote_entities(bytes, j, trim_end(bytes, j, close));
                        out.relocate(start, end, from);
                        i = close + 1;
                    }
                }
            }
            _ => i += 1,
        }
    }

    out.finish()
}

/// `url(...)` argument span with a matching pair of entity-encoded quotes
/// removed, e.g. `&quot;images/a.png&quot;`.
fn unquote_entities(bytes: &[u8], start: usize, end: usize) -> (usize, usize) {
    let arg = &bytes[start..end];
    for quote in ENTITY_QUOTES {
        let n = quote.len();
        if arg.len() >= 2 * n
            && starts_with_ci(arg, quote)
            && arg[arg.len() - n..].eq_ignore_ascii_case(quote)
        {
            return (start + n, end - n);
        }
    }
    (start, end)
}

/// `url(` at `i`, not preceded by an identifier character.
fn is_url_open(bytes: &[u8], i: usize) -> bool {
    if !starts_with_ci(&bytes[i..], b"url(") {
        return false;
    }
    match i.checked_sub(1).map(|p| bytes[p]) {
        Some(b) => !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
        None => true,
    }
}
