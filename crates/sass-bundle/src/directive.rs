//! Import directive recognition
//!
//! Only one directive form is understood: `@import '<path>';` written on its own
//! line, starting at the first column. Double-quoted, unquoted, `url()` and
//! comma-separated forms are not imports as far as the bundler is concerned.

/// First character of every directive line
pub const DIRECTIVE_MARKER: char = '@';

const IMPORT_KEYWORD: &str = "@import";

/// Check whether a line is a directive candidate at all
pub fn is_directive_line(line: &str) -> bool {
    line.starts_with(DIRECTIVE_MARKER)
}

/// Extract the file reference from an import directive line
///
/// The keyword, the surrounding single quotes, a leading `./` and the trailing
/// semicolon are stripped. Trailing whitespace (including the `\r` of CRLF
/// files) is ignored. Returns `None` when the line is not a single-quoted,
/// single-path import.
pub fn parse_import_line(line: &str) -> Option<&str> {
    if !is_directive_line(line) {
        return None;
    }

    let argument = line
        .strip_prefix(IMPORT_KEYWORD)?
        .strip_prefix([' ', '\t'])?
        .trim();
    let argument = argument.strip_suffix(';').map_or(argument, str::trim_end);

    let reference = argument.strip_prefix('\'')?.strip_suffix('\'')?;
    // A quote inside the argument means several paths or mixed quoting
    if reference.contains(['\'', '"']) {
        return None;
    }

    let reference = reference.strip_prefix("./").unwrap_or(reference);
    if reference.is_empty() {
        None
    } else {
        Some(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quoted_import() {
        assert_eq!(parse_import_line("@import './base';"), Some("base"));
        assert_eq!(
            parse_import_line("@import './partials/_buttons.scss';"),
            Some("partials/_buttons.scss")
        );
    }

    #[test]
    fn test_import_without_dot_slash() {
        assert_eq!(parse_import_line("@import 'theme/colors';"), Some("theme/colors"));
        assert_eq!(parse_import_line("@import '../shared/reset';"), Some("../shared/reset"));
    }

    #[test]
    fn test_optional_semicolon_and_trailing_whitespace() {
        assert_eq!(parse_import_line("@import './a'"), Some("a"));
        assert_eq!(parse_import_line("@import './a';\r"), Some("a"));
        assert_eq!(parse_import_line("@import   './a' ;  "), Some("a"));
    }

    #[test]
    fn test_unsupported_forms_are_not_imports() {
        assert_eq!(parse_import_line("@import \"double/quoted\";"), None);
        assert_eq!(parse_import_line("@import './x', './y';"), None);
        assert_eq!(parse_import_line("@import url('x.css');"), None);
        assert_eq!(parse_import_line("@import plain;"), None);
        assert_eq!(parse_import_line("@import '';"), None);
        assert_eq!(parse_import_line("@import './';"), None);
        assert_eq!(parse_import_line("@importer './a';"), None);
    }

    #[test]
    fn test_other_directives_and_plain_lines() {
        assert_eq!(parse_import_line("@use './a';"), None);
        assert_eq!(parse_import_line("@charset \"UTF-8\";"), None);
        assert_eq!(parse_import_line("  @import './indented';"), None);
        assert_eq!(parse_import_line("// @import './commented';"), None);
        assert_eq!(parse_import_line(""), None);
    }

    #[test]
    fn test_directive_marker_detection() {
        assert!(is_directive_line("@media screen {"));
        assert!(!is_directive_line(" @import './a';"));
        assert!(!is_directive_line(""));
    }
}
