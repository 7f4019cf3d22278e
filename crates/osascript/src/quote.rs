//! Quoting rules for values interpolated into statements.
//!
//! Two styles are in use. Application names and paths handed to `open` are
//! JSON string literals. The `cd` command typed into a terminal uses the
//! debug-inspection style below, which picks its quote character from the
//! content and escapes control characters as `\xHH`.

use std::path::{Component, Path, PathBuf};

/// Strings longer than this that contain newlines are split into one quoted
/// literal per line joined with ` +`.
const SPLIT_MIN_LENGTH: usize = 76;

/// Render `value` as a JSON string literal.
pub fn json_quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Render `value` as a debug-inspection string literal.
///
/// Single quotes are used unless the text contains `'`: then double quotes if
/// it has no `"`, else backticks if it has neither `` ` `` nor `${`, else
/// single quotes with `\'`. Backslashes and control characters are escaped.
pub fn inspect_quote(value: &str) -> String {
    if value.encode_utf16().count() > SPLIT_MIN_LENGTH && value.contains('\n') {
        return value
            .split_inclusive('\n')
            .map(inspect_quote_line)
            .collect::<Vec<_>>()
            .join(" +\n  ");
    }
    inspect_quote_line(value)
}

fn inspect_quote_line(value: &str) -> String {
    let quote = if !value.contains('\'') {
        '\''
    } else if !value.contains('"') {
        '"'
    } else if !value.contains('`') && !value.contains("${") {
        '`'
    } else {
        '\''
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\'' if quote == '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}' => {
                out.push_str(&format!("\\x{:02X}", ch as u32));
            }
            _ => out.push(ch),
        }
    }
    out.push(quote);
    out
}

/// Resolve `path` to an absolute, lexically normalized path.
///
/// Relative paths are joined onto the current directory; `.` and `..`
/// components are collapsed without touching the filesystem, so symlinks are
/// not followed.
pub fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_quote_escapes_quotes_and_backslashes() {
        assert_eq!(json_quote("Sublime Text"), "\"Sublime Text\"");
        assert_eq!(json_quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(json_quote("line\nbreak"), "\"line\\nbreak\"");
    }

    #[test]
    fn test_inspect_quote_plain() {
        assert_eq!(inspect_quote("/Users/me/project"), "'/Users/me/project'");
    }

    #[test]
    fn test_inspect_quote_switches_quote_character() {
        assert_eq!(inspect_quote("it's"), "\"it's\"");
        assert_eq!(inspect_quote(r#"it's "here""#), r#"`it's "here"`"#);
        assert_eq!(inspect_quote(r#"it's "here" `now`"#), r#"'it\'s "here" `now`'"#);
        assert_eq!(inspect_quote(r#"it's "${x}""#), r#"'it\'s "${x}"'"#);
    }

    #[test]
    fn test_inspect_quote_keeps_double_quote_inside_single_quotes() {
        assert_eq!(inspect_quote(r#"/tmp/a"b"#), r#"'/tmp/a"b'"#);
    }

    #[test]
    fn test_inspect_quote_escapes_backslash_and_controls() {
        assert_eq!(inspect_quote(r"C:\dir"), r"'C:\\dir'");
        assert_eq!(inspect_quote("a\tb\nc"), r"'a\tb\nc'");
        assert_eq!(inspect_quote("\u{1b}[0m"), r"'\x1B[0m'");
        assert_eq!(inspect_quote("\u{7f}\u{b}"), r"'\x7F\x0B'");
    }

    #[test]
    fn test_inspect_quote_splits_long_multiline() {
        let long = format!("{}\n{}", "a".repeat(40), "b".repeat(40));
        assert_eq!(
            inspect_quote(&long),
            format!("'{}\\n' +\n  '{}'", "a".repeat(40), "b".repeat(40))
        );
    }

    #[test]
    fn test_resolve_path_collapses_dots() {
        let resolved = resolve_path(Path::new("/Users/me/./project/../other")).unwrap();
        assert_eq!(resolved, PathBuf::from("/Users/me/other"));
    }

    #[test]
    fn test_resolve_path_relative_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = resolve_path(Path::new("src")).unwrap();
        assert_eq!(resolved, cwd.join("src"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_path_does_not_escape_root() {
        assert_eq!(resolve_path(Path::new("/../..")).unwrap(), PathBuf::from("/"));
    }
}
