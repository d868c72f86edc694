// ABOUTME: POSIX shell quoting for remote command lines.
// ABOUTME: Paths are single-quoted so project names cannot inject shell syntax.

/// Quote `value` as a single shell word.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
