//! Default command: run the presentation.

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::profile::Profile;
use folio_core::theme::ThemeMode;
use tracing::info;

use crate::logging;

pub struct PresentOptions<'a> {
    pub config_path: Option<&'a Path>,
    pub theme: Option<ThemeMode>,
    pub persist: bool,
}

pub fn run(options: PresentOptions<'_>) -> Result<()> {
    let _log_guard = logging::init();

    let config = match options.config_path {
        Some(path) => Config::load_from(path).context("load config")?,
        None => Config::default(),
    };
    let profile_path = config.profile_path();
    let profile = Profile::load(profile_path.as_deref()).context("load profile")?;
    let source = match &profile_path {
        Some(path) => path.display().to_string(),
        None => "bundled".to_string(),
    };
    info!(profile = %source, persist = options.persist, "starting presentation");

    launch(&config, profile, &options)
}

#[cfg(feature = "tui")]
fn launch(config: &Config, profile: Profile, options: &PresentOptions<'_>) -> Result<()> {
    folio_tui::run_presentation(
        config,
        profile,
        folio_tui::LaunchOptions {
            theme_override: options.theme,
            persist: options.persist,
        },
    )
}

#[cfg(not(feature = "tui"))]
fn launch(_config: &Config, _profile: Profile, _options: &PresentOptions<'_>) -> Result<()> {
    anyhow::bail!("folio was built without the `tui` feature")
}
