//! Filesystem and path helpers

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Read the full contents of a file as UTF-8 text
///
/// Invalid UTF-8 sequences are replaced rather than rejected. Any failure to
/// open or read the file is returned untouched so the caller sees the original
/// `io::Error` kind and message.
pub fn read_file(path: impl AsRef<Path>) -> io::Result<String> {
    let bytes = fs::read(path.as_ref())?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Collapse `.` and `..` components without touching the filesystem
///
/// `..` at the root stays at the root, the same way absolute path resolution
/// behaves in a shell.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                if at_root {
                    if !normalized.has_root() {
                        normalized.push(component);
                    }
                } else if normalized.ends_with(Component::ParentDir) {
                    normalized.push(component);
                } else {
                    normalized.pop();
                }
            }
        }
    }
    normalized
}
