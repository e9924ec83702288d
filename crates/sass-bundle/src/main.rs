use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{LevelFilter, debug, info};
use sass_bundle::{
    compilation::{Compilation, SassBundlePlugin},
    config::{Config, OutputConfig},
    types::StyleType,
};

#[derive(Parser, Debug)]
#[command(
    name = "sass-bundle",
    version,
    about = "Concatenate the stylesheets imported by an entry file into one asset"
)]
struct Cli {
    /// Entry stylesheet whose `@import` lines are bundled
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Extension of the produced asset
    #[arg(short = 't', long = "type", value_enum)]
    style_type: Option<StyleType>,

    /// Base name of the produced asset
    #[arg(short = 'n', long)]
    output_name: Option<String>,

    /// Directory to write the asset into
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Config file to use instead of ./sass-bundle.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the bundle to stdout instead of writing it to disk
    #[arg(long)]
    stdout: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config_layer(&self) -> Config {
        Config {
            file: self.file.clone(),
            style_type: self.style_type,
            output: OutputConfig {
                name: self.output_name.clone(),
                dir: self.output_dir.clone(),
            },
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge(cli.config_layer());
    let options = config.into_options().context("Incomplete configuration")?;
    debug!("Resolved options: {options:?}");

    let output_dir = options.output_dir.clone();
    let plugin = SassBundlePlugin::new(options);
    let mut compilation = Compilation::new();
    compilation.emit_with(&[&plugin])?;

    if cli.stdout {
        let mut stdout = io::stdout().lock();
        for asset in compilation.assets() {
            stdout.write_all(asset.source().as_bytes())?;
        }
        stdout.flush()?;
    } else {
        let written = compilation.write_to(&output_dir)?;
        info!("Emitted {} asset(s)", written.len());
    }

    Ok(())
}
