//! Stylesheet bundling
//!
//! A bundle is the text of every file imported by the entry file, in import
//! order, each followed by a newline. Only the entry file's own directives are
//! considered.

use std::{io, path::Path};

use log::{debug, info};

use crate::{
    resolver::{base_directory, collect_import_paths},
    types::StyleType,
    util::read_file,
};

/// A named piece of output handed to the host pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
    name: String,
    content: String,
}

impl OutputAsset {
    /// Create an asset from its file name and text
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Logical file name, `<output name>.<type>`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bundled text
    pub fn source(&self) -> &str {
        &self.content
    }

    /// Size of the bundled text in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Consume the asset, returning the bundled text
    pub fn into_source(self) -> String {
        self.content
    }
}

/// Bundle the files imported by `entry_path` into a single asset
///
/// The asset is named `<output_name>.<style_type>` regardless of the entry
/// file's own extension. Any failure to read the entry file or one of its
/// imports aborts the run and returns the underlying `io::Error` unchanged; no
/// partial bundle is produced.
pub fn bundle(
    entry_path: impl AsRef<Path>,
    style_type: StyleType,
    output_name: &str,
) -> io::Result<OutputAsset> {
    let entry_path = entry_path.as_ref();
    let entry_source = read_file(entry_path)?;

    let root = base_directory(entry_path);
    let import_paths = collect_import_paths(entry_source.split('\n'), &root)?;
    debug!(
        "Found {} imports in {}",
        import_paths.len(),
        entry_path.display()
    );

    let mut buffer = String::new();
    for path in &import_paths {
        buffer.push_str(&read_file(path)?);
        buffer.push('\n');
    }

    let asset = OutputAsset::new(format!("{output_name}.{style_type}"), buffer);
    info!(
        "Bundled {} files into {} ({} bytes)",
        import_paths.len(),
        asset.name(),
        asset.size()
    );
    Ok(asset)
}
