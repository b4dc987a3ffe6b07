/// Last path component, accepting both `/` and `\` separators.
pub fn base_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Extension of a base name including the dot, lowercased.
/// Leading dots do not start an extension (`.htaccess` has none).
pub fn extension(name: &str) -> String {
    match name.rfind('.') {
        Some(i) if !name[..i].bytes().all(|b| b == b'.') => name[i..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
