//! Extension-driven folder assignment.

/// One row of the classification table: every extension in `extensions`
/// lands in `folder`.
#[derive(Clone, Copy, Debug)]
pub struct ExtensionRule {
    pub extensions: &'static [&'static str],
    pub folder: &'static str,
}

/// Folder label for files kept at the archive root.
pub const ROOT: &str = "";

pub const CSS_FOLDER: &str = "css/";

pub static EXTENSION_RULES: &[ExtensionRule] = &[
    ExtensionRule {
        extensions: &[".css"],
        folder: CSS_FOLDER,
    },
    ExtensionRule {
        extensions: &[".jpg", ".jpeg", ".png", ".svg", ".webp", ".gif"],
        folder: "img/",
    },
    ExtensionRule {
        extensions: &[".js"],
        folder: "js/",
    },
    ExtensionRule {
        extensions: &[".woff", ".woff2", ".ttf", ".eot", ".otf"],
        folder: "fonts/",
    },
    ExtensionRule {
        extensions: &[".mp4", ".webm", ".ogg"],
        folder: "video/",
    },
];

pub const MARKUP_EXTENSIONS: &[&str] = &[".html", ".htm"];

/// Destination folder for an extension such as `.png`. Unknown or empty
/// extensions map to [`ROOT`].
pub fn classify(ext: &str) -> &'static str {
    EXTENSION_RULES
        .iter()
        .find(|rule| rule.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .map(|rule| rule.folder)
        .unwrap_or(ROOT)
}

/// True when `ext` has a row in the table.
pub fn is_known(ext: &str) -> bool {
    classify(ext) != ROOT
}

pub fn is_markup(ext: &str) -> bool {
    MARKUP_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

pub fn is_stylesheet(ext: &str) -> bool {
    classify(ext) == CSS_FOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows() {
        let cases = [
            (".css", "css/"),
            (".jpg", "img/"),
            (".jpeg", "img/"),
            (".png", "img/"),
            (".svg", "img/"),
            (".webp", "img/"),
            (".gif", "img/"),
            (".js", "js/"),
            (".woff", "fonts/"),
            (".woff2", "fonts/"),
            (".ttf", "fonts/"),
            (".eot", "fonts/"),
            (".otf", "fonts/"),
            (".mp4", "video/"),
            (".webm", "video/"),
            (".ogg", "video/"),
            (".html", ""),
            (".htm", ""),
            (".pdf", ""),
            ("", ""),
        ];
        for (ext, folder) in cases {
            assert_eq!(classify(ext), folder, "extension {ext:?}");
        }
    }

    #[test]
    fn case_insensitive() {
        for rule in EXTENSION_RULES {
            for ext in rule.extensions {
                assert_eq!(classify(&ext.to_ascii_uppercase()), rule.folder);
            }
        }
        assert!(is_markup(".HTML"));
        assert!(is_stylesheet(".Css"));
    }

    #[test]
    fn each_extension_has_one_folder() {
        let mut seen = std::collections::HashSet::new();
        for rule in EXTENSION_RULES {
            for ext in rule.extensions {
                assert!(seen.insert(*ext), "{ext} listed twice");
            }
        }
    }

    #[test]
    fn markup_is_not_relocated() {
        assert!(!is_known(".html"));
        assert!(is_known(".webp"));
    }
}
