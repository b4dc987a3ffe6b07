use super::scan::{find_byte, find_ci, skip_ws, starts_with_ci};
use super::stylesheet::rewrite_stylesheet_in;
use super::{Splicer, into_text, relocate};
use crate::classify::ROOT;

/// Attributes holding a single URL.
const URL_ATTRS: &[&str] = &[
    "href",
    "src",
    "poster",
    "data",
    "background",
    "data-src",
    "xlink:href",
];

/// Attributes holding a comma-separated list of `url descriptor` candidates.
const SRCSET_ATTRS: &[&str] = &["srcset", "data-srcset"];

/// Rewrite asset references in an HTML document kept at the archive root.
pub fn rewrite_markup(text: &str) -> String {
    into_text(rewrite_markup_bytes(text.as_bytes()))
}

/// [`rewrite_markup`] for documents in any ASCII-compatible encoding. Text
/// that is not UTF-8 is copied through; references around it still move.
pub fn rewrite_markup_bytes(src: &[u8]) -> Vec<u8> {
    rewrite_markup_in(src, ROOT)
}

pub fn rewrite_markup_in(bytes: &[u8], from: &str) -> Vec<u8> {
    let mut out = Splicer::new(bytes);
    let mut i = 0;

    while let Some(lt) = find_byte(bytes, i, b'<') {
        let next = bytes.get(lt + 1).copied();

        if starts_with_ci(&bytes[lt..], b"<!--") {
            match find_ci(bytes, lt + 4, b"-->") {
                Some(end) => {
                    i = end + 3;
                    continue;
                }
                None => break,
            }
        }

        match next {
            Some(b'/' | b'!' | b'?') => match find_byte(bytes, lt, b'>') {
                Some(gt) => i = gt + 1,
                None => break,
            },
            Some(b) if b.is_ascii_alphabetic() => {
                let Some(tag) = scan_tag(bytes, lt + 1, from) else {
                    break;
                };
                for edit in &tag.edits {
                    out.replace(edit.start, edit.end, &edit.with);
                }
                i = tag.end;

                let raw_text = matches!(tag.name.as_str(), "script" | "style");
                if raw_text && !tag.self_closing {
                    let closer = format!("</{}", tag.name);
                    let Some(close) = find_ci(bytes, i, closer.as_bytes()) else {
                        break;
                    };
                    if tag.name == "style" {
                        let body = &bytes[i..close];
                        let rewritten = rewrite_stylesheet_in(body, from);
                        if rewritten != body {
                            out.replace(i, close, &rewritten);
                        }
                    }
                    i = close;
                }
            }
            _ => i = lt + 1,
        }
    }

    out.finish()
}

struct Edit {
    start: usize,
    end: usize,
    with: Vec<u8>,
}

struct Tag {
    name: String,
    /// Index just past the closing `>`.
    end: usize,
    self_closing: bool,
    edits: Vec<Edit>,
}

/// Parse a start tag whose name begins at `start`. Returns `None` when the
/// tag or one of its quoted values never terminates; the caller then leaves
/// the remainder untouched.
fn scan_tag(bytes: &[u8], start: usize, from: &str) -> Option<Tag> {
    let mut i = start;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = String::from_utf8_lossy(&bytes[start..i]).to_ascii_lowercase();
    let mut edits = Vec::new();
    let mut self_closing = false;

    loop {
        i = skip_ws(bytes, i);
        match *bytes.get(i)? {
            b'>' => {
                return Some(Tag {
                    name,
                    end: i + 1,
                    self_closing,
                    edits,
                });
            }
            b'/' => {
                self_closing = true;
                i += 1;
                continue;
            }
            _ => self_closing = false,
        }

        let attr_start = i;
        while i < bytes.len()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
            && !bytes[i].is_ascii_whitespace()
        {
            i += 1;
        }
        if i == attr_start {
            // stray `=`
            i += 1;
            continue;
        }
        let attr = String::from_utf8_lossy(&bytes[attr_start..i]).to_ascii_lowercase();

        i = skip_ws(bytes, i);
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i = skip_ws(bytes, i + 1);

        let (value_start, value_end) = match *bytes.get(i)? {
            q @ (b'"' | b'\'') => {
                let close = find_byte(bytes, i + 1, q)?;
                let span = (i + 1, close);
                i = close + 1;
                span
            }
            _ => {
                let begin = i;
                while i < bytes.len() && bytes[i] != b'>' && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                (begin, i)
            }
        };

        if let Some(with) = rewrite_attr(&attr, &bytes[value_start..value_end], from) {
            edits.push(Edit {
                start: value_start,
                end: value_end,
                with,
            });
        }
    }
}

fn rewrite_attr(attr: &str, value: &[u8], from: &str) -> Option<Vec<u8>> {
    if attr == "style" {
        let rewritten = rewrite_stylesheet_in(value, from);
        return (rewritten != value).then_some(rewritten);
    }
    let value = std::str::from_utf8(value).ok()?;
    let rewritten = if URL_ATTRS.contains(&attr) {
        relocate(value, from)
    } else if SRCSET_ATTRS.contains(&attr) {
        rewrite_srcset(value, from)
    } else {
        None
    };
    rewritten.map(String::into_bytes)
}

fn rewrite_srcset(value: &str, from: &str) -> Option<String> {
    // Commas inside data URIs make the candidate list ambiguous.
    if value.contains("data:") {
        return None;
    }
    let mut changed = false;
    let candidates: Vec<String> = value
        .split(',')
        .map(|candidate| {
            let lead = candidate.len() - candidate.trim_start().len();
            let body = &candidate[lead..];
            let url_end = body.find(char::is_whitespace).unwrap_or(body.len());
            match relocate(&body[..url_end], from) {
                Some(url) => {
                    changed = true;
                    format!("{}{url}{}", &candidate[..lead], &body[url_end..])
                }
                None => candidate.to_string(),
            }
        })
        .collect();
    changed.then(|| candidates.join(","))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_common_asset_attributes() {
        let html = r#"<!DOCTYPE html>
<html><head>
<link rel="stylesheet" href="assets/css/main.css">
<script src='scripts/app.js'></script>
</head><body>
<img src=images/logo.png alt="Logo">
<video poster="media/poster.webp"><source src="media/clip.mp4" type="video/mp4"></video>
<a href="pages/about.html#team">About</a>
</body></html>"#;
        let got = rewrite_markup(html);
        assert!(got.contains(r#"href="css/main.css""#));
        assert!(got.contains("src='js/app.js'"));
        assert!(got.contains("src=img/logo.png alt=\"Logo\""));
        assert!(got.contains(r#"poster="img/poster.webp""#));
        assert!(got.contains(r#"src="video/clip.mp4""#));
        assert!(got.contains(r#"href="about.html#team""#));
        assert!(got.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn leaves_external_and_unknown_references() {
        let html = r##"<script src="https://cdn.example.com/a.js"></script>
<a href="//example.com/x.png">x</a><a href="mailto:a@b.c">m</a>
<a href="files/report.pdf">pdf</a><a href="#top">top</a>
<img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=">"##;
        assert_eq!(rewrite_markup(html), html);
    }

    #[test]
    fn ignores_unrelated_attributes() {
        let html = r#"<img alt="images/logo.png" title='a.css' src="img/logo.png">"#;
        assert_eq!(rewrite_markup(html), html);
    }

    #[test]
    fn srcset_candidates() {
        let html = r#"<img srcset="small/a.png 1x, large/a@2x.png 2x" src="small/a.png">"#;
        assert_eq!(
            rewrite_markup(html),
            r#"<img srcset="img/a.png 1x, img/a@2x.png 2x" src="img/a.png">"#
        );
    }

    #[test]
    fn inline_styles_resolve_from_root() {
        let html = r#"<div style="background:url('images/bg.jpg')"></div>
<style>
  @font-face { src: url(assets/font.woff2); }
</style>"#;
        let got = rewrite_markup(html);
        assert!(got.contains("url('img/bg.jpg')"));
        assert!(got.contains("url(fonts/font.woff2)"));
    }

    #[test]
    fn script_bodies_and_comments_are_verbatim() {
        let html = r#"<script>var s = '<img src="images/a.png">';</script>
<!-- <img src="images/b.png"> -->
<img src="images/c.png">"#;
        let got = rewrite_markup(html);
        assert!(got.contains(r#"'<img src="images/a.png">'"#));
        assert!(got.contains(r#"<!-- <img src="images/b.png"> -->"#));
        assert!(got.contains(r#"<img src="img/c.png">"#));
    }

    #[test]
    fn case_and_spacing_in_tags() {
        let html = "<IMG SRC = \"Pics/Logo.PNG\" /><LINK HREF=\"x/Y.CSS\">";
        assert_eq!(
            rewrite_markup(html),
            "<IMG SRC = \"img/Logo.PNG\" /><LINK HREF=\"css/Y.CSS\">"
        );
    }

    #[test]
    fn malformed_markup_passes_through_after_last_good_tag() {
        let html = r#"<img src="images/a.png"> 1 < 2 <img src="images/b.png"#;
        assert_eq!(
            rewrite_markup(html),
            r#"<img src="img/a.png"> 1 < 2 <img src="images/b.png"#
        );
        let unclosed_comment = "<!-- <img src=\"images/a.png\">";
        assert_eq!(rewrite_markup(unclosed_comment), unclosed_comment);
    }

    #[test]
    fn non_ascii_text_survives() {
        let html = "<p>Привет, мир</p><img src=\"картинки/фото.jpg\">";
        assert_eq!(
            rewrite_markup(html),
            "<p>Привет, мир</p><img src=\"img/фото.jpg\">"
        );
    }

    #[test]
    fn reapplying_is_stable() {
        let once = rewrite_markup(r#"<link href="a/b.css"><img src="c/d.gif">"#);
        assert_eq!(rewrite_markup(&once), once);
    }

    #[test]
    fn legacy_encoded_text_does_not_block_rewriting() {
        // "Привет" in windows-1251
        let html = b"<p title=\"\xcf\xf0\">\xcf\xf0\xe8\xe2\xe5\xf2</p><img src=\"images/logo.png\">";
        assert_eq!(
            rewrite_markup_bytes(html),
            b"<p title=\"\xcf\xf0\">\xcf\xf0\xe8\xe2\xe5\xf2</p><img src=\"img/logo.png\">"
        );
    }

    #[test]
    fn non_utf8_reference_is_kept() {
        let html = b"<img src=\"\xd4\xee\xf2\xee/a.png\"><img src=\"b/c.png\">";
        assert_eq!(
            rewrite_markup_bytes(html),
            b"<img src=\"\xd4\xee\xf2\xee/a.png\"><img src=\"img/c.png\">"
        );
    }

    #[test]
    fn entity_quoted_inline_style() {
        let html = r#"<div style="background-image:url(&quot;images/bg.jpg&quot;)"></div>"#;
        assert_eq!(
            rewrite_markup(html),
            r#"<div style="background-image:url(&quot;img/bg.jpg&quot;)"></div>"#
        );
    }

    #[test]
    fn svg_xlink_href() {
        let html = r##"<svg><image xlink:href="images/a.png"/><use xlink:href="#icon"/></svg>"##;
        assert_eq!(
            rewrite_markup(html),
            r##"<svg><image xlink:href="img/a.png"/><use xlink:href="#icon"/></svg>"##
        );
    }
}
