//! Shared type definitions for the sass-bundle crate

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Stylesheet flavour of the produced bundle
///
/// The tag only decides the extension of the output asset. Bundled content is
/// never checked against either syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    /// Indented syntax (`.sass`)
    Sass,
    /// Brace syntax (`.scss`)
    Scss,
}

impl StyleType {
    /// File extension used for the output asset
    pub fn extension(self) -> &'static str {
        match self {
            Self::Sass => "sass",
            Self::Scss => "scss",
        }
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for StyleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sass" => Ok(Self::Sass),
            "scss" => Ok(Self::Scss),
            other => Err(format!(
                "unsupported stylesheet type '{other}', expected 'sass' or 'scss'"
            )),
        }
    }
}
