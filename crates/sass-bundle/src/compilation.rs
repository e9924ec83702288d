//! Host build pipeline
//!
//! A `Compilation` collects the assets produced during one build. Plugins run
//! at the emit stage, after assembly and before anything is persisted. A plugin
//! signals completion by returning `Ok(())` and failure by returning the error,
//! which the compilation passes straight back to its caller.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info};

use crate::{
    bundler::{OutputAsset, bundle},
    config::BundleOptions,
};

/// Emit-stage hook run by a [`Compilation`]
pub trait Plugin {
    /// Name used in log output
    fn name(&self) -> &'static str;

    /// Add this plugin's output to the compilation
    fn emit(&self, compilation: &mut Compilation) -> io::Result<()>;
}

/// Assets produced by one build, keyed by file name in emission order
#[derive(Debug, Default)]
pub struct Compilation {
    assets: IndexMap<String, OutputAsset>,
}

impl Compilation {
    /// Create a compilation with no assets
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset, replacing any previous asset of the same name
    pub fn insert_asset(&mut self, asset: OutputAsset) -> Option<OutputAsset> {
        self.assets.insert(asset.name().to_owned(), asset)
    }

    /// Look up an asset by file name
    pub fn asset(&self, name: &str) -> Option<&OutputAsset> {
        self.assets.get(name)
    }

    /// Iterate over assets in emission order
    pub fn assets(&self) -> impl Iterator<Item = &OutputAsset> {
        self.assets.values()
    }

    /// Whether no asset has been emitted yet
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Run the emit hooks in order, stopping at the first failure
    pub fn emit_with(&mut self, plugins: &[&dyn Plugin]) -> io::Result<()> {
        for plugin in plugins {
            debug!("Running emit hook {}", plugin.name());
            plugin.emit(self)?;
        }
        Ok(())
    }

    /// Persist every asset under `output_dir`, returning the written paths
    pub fn write_to(&self, output_dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir)?;
        let mut written = Vec::with_capacity(self.assets.len());
        for (name, asset) in &self.assets {
            let path = output_dir.join(name);
            fs::write(&path, asset.source())?;
            info!("Wrote {} ({} bytes)", path.display(), asset.size());
            written.push(path);
        }
        Ok(written)
    }
}

/// Plugin that bundles a stylesheet entry file into one asset
#[derive(Debug, Clone)]
pub struct SassBundlePlugin {
    options: BundleOptions,
}

impl SassBundlePlugin {
    /// Create a plugin for one entry file and output name
    pub fn new(options: BundleOptions) -> Self {
        Self { options }
    }
}

impl Plugin for SassBundlePlugin {
    fn name(&self) -> &'static str {
        "SassBundlePlugin"
    }

    fn emit(&self, compilation: &mut Compilation) -> io::Result<()> {
        let asset = bundle(
            &self.options.file,
            self.options.style_type,
            &self.options.output_name,
        )?;
        compilation.insert_asset(asset);
        Ok(())
    }
}
