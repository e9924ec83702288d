//! Bundles the stylesheets imported by a sass/scss entry file into one asset.

pub mod bundler;
pub mod compilation;
pub mod config;
pub mod directive;
pub mod resolver;
pub mod types;
pub mod util;

pub use bundler::{OutputAsset, bundle};
