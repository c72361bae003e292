// file: src/utils/shell.rs
// version: 1.0.1
// guid: f4a5b6c7-d8e9-0123-4567-890123fabcde

//! Shell command helpers

/// Quote a string for POSIX sh.
///
/// Wraps in single quotes; embedded single quotes are closed, escaped, and
/// reopened.
pub fn sh_quote(value: &str) -> String {
    if !value.is_empty() && value.chars().all(is_safe_char) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '=')
}

/// Last whitespace-separated field of a string.
///
/// `hostname -I` lists all addresses of the host; the externally reachable
/// one is the last entry.
pub fn last_field(output: &str) -> Option<&str> {
    output.split_whitespace().last()
}
