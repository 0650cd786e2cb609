use std::path::Path;

/// Quote a path for embedding into a tool argument string.
///
/// Callers are responsible for quoting anything that may contain spaces; the
/// tool service quotes every path it passes through unconditionally.
#[must_use]
pub fn quote(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

/// Split a shell-style argument string into individual arguments.
///
/// Whitespace separates arguments; double quotes group a span (quotes are
/// stripped, not passed to the child). An unterminated quote extends to the
/// end of the string.
#[must_use]
pub fn split_arguments(arguments: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_content = false;

    for ch in arguments.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_content = true;
            }
            ch if ch.is_whitespace() && !in_quotes => {
                if has_content {
                    parts.push(std::mem::take(&mut current));
                    has_content = false;
                }
            }
            ch => {
                current.push(ch);
                has_content = true;
            }
        }
    }

    if has_content {
        parts.push(current);
    }

    parts
}
