//! Config command handlers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use folio_core::config;

fn require(path: Option<&Path>) -> Result<&Path> {
    match path {
        Some(path) => Ok(path),
        None => bail!("Cannot determine the config directory; set FOLIO_HOME or pass --config"),
    }
}

pub fn path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", require(config_path)?.display());
    Ok(())
}

pub fn init(config_path: Option<&Path>) -> Result<()> {
    let config_path = require(config_path)?;
    config::Config::init(config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}
