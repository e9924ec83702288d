//! Resolution of import references to file paths
//!
//! Every import is resolved against a single root derived from the entry file's
//! own path. Imports of imported files are never followed.

use std::{
    env,
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::{
    directive::{is_directive_line, parse_import_line},
    util::normalize_path,
};

/// Compute the resolution root for an entry file
///
/// The trailing run of dots and lowercase ASCII letters is stripped from the
/// entry path. For `styles/index.sass` this leaves `styles/`, but a file stem
/// containing other characters keeps its prefix (`styles/main-theme.scss`
/// gives `styles/main-`). Existing builds depend on this exact rule.
///
/// The path is trimmed as raw bytes and never decoded, so non-UTF-8 directory
/// names survive intact.
pub fn base_directory(entry_path: &Path) -> PathBuf {
    let bytes = entry_path.as_os_str().as_encoded_bytes();
    let end = bytes
        .iter()
        .rposition(|b| !(*b == b'.' || b.is_ascii_lowercase()))
        .map_or(0, |idx| idx + 1);
    // SAFETY: `end` is either 0, the full length, or the index of an ASCII byte,
    // all of which are valid split points for encoded OS strings.
    let stripped = unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[..end]) };
    PathBuf::from(stripped)
}

/// Resolve one import reference against the resolution root
///
/// A relative root is anchored at `working_dir`. The result is absolute with
/// `.` and `..` collapsed. An absolute reference replaces the root entirely.
pub fn resolve_import(base_directory: &Path, reference: &str, working_dir: &Path) -> PathBuf {
    let root = if base_directory.is_absolute() {
        base_directory.to_path_buf()
    } else {
        working_dir.join(base_directory)
    };
    normalize_path(&root.join(reference))
}

/// Turn the entry file's lines into the ordered list of files to bundle
///
/// Order follows the source lines; duplicates are kept. Lines that are not
/// recognised import directives are skipped without error. The working
/// directory is only consulted when the root is relative and an import exists.
pub fn collect_import_paths<'a>(
    source_lines: impl IntoIterator<Item = &'a str>,
    base_directory: &Path,
) -> io::Result<Vec<PathBuf>> {
    let mut working_dir: Option<PathBuf> = None;
    let mut paths = Vec::new();

    for line in source_lines {
        if !is_directive_line(line) {
            continue;
        }
        let Some(reference) = parse_import_line(line) else {
            trace!("Ignoring unsupported directive: {line}");
            continue;
        };
        if working_dir.is_none() && base_directory.is_relative() {
            working_dir = Some(env::current_dir()?);
        }
        let anchor = working_dir.as_deref().unwrap_or(base_directory);
        let resolved = resolve_import(base_directory, reference, anchor);
        debug!("Resolved import '{reference}' to {}", resolved.display());
        paths.push(resolved);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_base_directory_strips_lowercase_file_name() {
        assert_eq!(
            base_directory(Path::new("/project/styles/index.sass")),
            PathBuf::from("/project/styles/")
        );
        assert_eq!(base_directory(Path::new("index.scss")), PathBuf::from(""));
    }

    #[test]
    fn test_base_directory_keeps_stem_prefix() {
        assert_eq!(
            base_directory(Path::new("/project/styles/main-theme.scss")),
            PathBuf::from("/project/styles/main-")
        );
        assert_eq!(
            base_directory(Path::new("/project/styles/Index.SASS")),
            PathBuf::from("/project/styles/Index.SASS")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_base_directory_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let entry = Path::new(OsStr::from_bytes(b"/project/st\xffyles/index.sass"));
        assert_eq!(
            base_directory(entry).as_os_str().as_bytes(),
            b"/project/st\xffyles/"
        );
    }

    #[test]
    fn test_base_directory_strips_lowercase_directory_without_extension() {
        assert_eq!(
            base_directory(Path::new("/project/styles")),
            PathBuf::from("/project/")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_import_absolute_root() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_import(Path::new("/project/styles/"), "base", cwd),
            PathBuf::from("/project/styles/base")
        );
        assert_eq!(
            resolve_import(Path::new("/project/styles/"), "../shared/reset.sass", cwd),
            PathBuf::from("/project/shared/reset.sass")
        );
        assert_eq!(
            resolve_import(Path::new("/project/styles/"), "/vendor/a.sass", cwd),
            PathBuf::from("/vendor/a.sass")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_import_relative_root() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_import(Path::new("styles/"), "base", cwd),
            PathBuf::from("/work/styles/base")
        );
        assert_eq!(
            resolve_import(Path::new(""), "base", cwd),
            PathBuf::from("/work/base")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_preserves_line_order_and_duplicates() -> io::Result<()> {
        let source = "@import './c';\n// not an import\n\n@import './a';\n@import './c';\n";
        let paths = collect_import_paths(source.split('\n'), Path::new("/styles/"))?;
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/styles/c"),
                PathBuf::from("/styles/a"),
                PathBuf::from("/styles/c"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_collect_skips_unsupported_directives() -> io::Result<()> {
        let source = [
            "@charset \"UTF-8\";",
            "@import \"double/quoted\";",
            "@import './x', './y';",
            "$width: 10px;",
        ];
        let paths = collect_import_paths(source, Path::new("/styles/"))?;
        assert!(paths.is_empty());
        Ok(())
    }

    #[test]
    fn test_collect_without_imports_is_empty() -> io::Result<()> {
        let paths = collect_import_paths(std::iter::empty(), Path::new("/styles/"))?;
        assert!(paths.is_empty());
        Ok(())
    }
}
