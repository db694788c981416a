//! Theme preference: resolution, toggling and best-effort persistence.
//!
//! Resolution order at startup:
//! 1. persisted value (`preferences.toml`, key `theme`)
//! 2. system appearance signal
//! 3. `Light`
//!
//! The applied [`Palette`] is the presentation context renderers read. It is
//! replaced together with the mode, so the two never disagree.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use toml_edit::{DocumentMut, value as toml_value};
use tracing::{debug, warn};

/// Key under which the preference is persisted.
pub const THEME_KEY: &str = "theme";

/// Binary theme choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parses a persisted value. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Semantic colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub border: Rgb,
    pub blob_primary: Rgb,
    pub blob_secondary: Rgb,
    pub blob_tertiary: Rgb,
    pub follower: Rgb,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self {
                mode,
                background: Rgb(255, 255, 255),
                surface: Rgb(249, 250, 251),
                text: Rgb(17, 24, 39),
                muted: Rgb(107, 114, 128),
                accent: Rgb(37, 99, 235),
                border: Rgb(229, 231, 235),
                blob_primary: Rgb(191, 219, 254),
                blob_secondary: Rgb(233, 213, 255),
                blob_tertiary: Rgb(167, 243, 208),
                follower: Rgb(241, 245, 249),
            },
            ThemeMode::Dark => Self {
                mode,
                background: Rgb(10, 10, 12),
                surface: Rgb(24, 24, 27),
                text: Rgb(244, 244, 245),
                muted: Rgb(161, 161, 170),
                accent: Rgb(96, 165, 250),
                border: Rgb(39, 39, 42),
                blob_primary: Rgb(30, 58, 138),
                blob_secondary: Rgb(88, 28, 135),
                blob_tertiary: Rgb(6, 78, 59),
                follower: Rgb(51, 65, 85),
            },
        }
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Key-value record holding the persisted theme.
pub trait PreferenceStore {
    /// Reads the persisted value, `None` when nothing was stored yet.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Persists `value`.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, value: &str) -> Result<()>;
}

/// Stores the preference in a TOML file, leaving other keys and comments intact.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<Option<DocumentMut>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let path = &self.path;
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preferences from {}", path.display()))?;
        let doc = contents
            .parse::<DocumentMut>()
            .with_context(|| format!("Failed to parse preferences from {}", path.display()))?;
        Ok(Some(doc))
    }

    /// Moves an unreadable file aside so the next write starts clean.
    fn set_aside(&self) {
        let backup = self.path.with_extension("toml.bak");
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!(backup = %backup.display(), "unreadable preferences moved aside"),
            Err(err) => debug!(error = %err, "could not move preferences aside"),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<String>> {
        let Some(doc) = self.read_document()? else {
            return Ok(None);
        };
        let theme = doc.get(THEME_KEY).and_then(|item| item.as_str());
        Ok(theme.map(str::to_string))
    }

    fn save(&mut self, value: &str) -> Result<()> {
        let mut doc = match self.read_document() {
            Ok(doc) => doc.unwrap_or_default(),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "replacing unreadable preferences");
                self.set_aside();
                DocumentMut::new()
            }
        };
        doc[THEME_KEY] = toml_value(value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, doc.to_string())
            .with_context(|| format!("Failed to write preferences to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store, used when no preferences file is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    value: Option<String>,
    deny_writes: bool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            deny_writes: false,
        }
    }

    /// Store that rejects every write, like storage denied by the host.
    pub fn denying_writes(value: Option<String>) -> Self {
        Self {
            value,
            deny_writes: true,
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> Result<()> {
        if self.deny_writes {
            anyhow::bail!("preference storage denied");
        }
        self.value = Some(value.to_string());
        Ok(())
    }
}

// ============================================================================
// System appearance
// ============================================================================

/// System-level color-scheme signal, read once at startup.
pub trait SystemAppearance {
    /// Preferred scheme, `None` when the signal is unavailable.
    fn color_scheme(&self) -> Option<ThemeMode>;
}

/// Reads the terminal environment.
///
/// `FOLIO_COLOR_SCHEME` (`light`/`dark`) wins; otherwise the `COLORFGBG`
/// convention (`fg;bg`, background index decides) is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvAppearance;

impl SystemAppearance for EnvAppearance {
    fn color_scheme(&self) -> Option<ThemeMode> {
        if let Ok(value) = std::env::var("FOLIO_COLOR_SCHEME")
            && let Some(mode) = ThemeMode::parse(&value)
        {
            return Some(mode);
        }
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|value| scheme_from_colorfgbg(&value))
    }
}

/// Fixed answer, for tests and command-line overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAppearance(pub Option<ThemeMode>);

impl SystemAppearance for FixedAppearance {
    fn color_scheme(&self) -> Option<ThemeMode> {
        self.0
    }
}

/// Interprets a `COLORFGBG` value such as `"15;0"` or `"0;default;15"`.
///
/// The last field is the background palette index: 0-6 and 8 are dark
/// backgrounds, 7 and 9-15 are light.
pub fn scheme_from_colorfgbg(value: &str) -> Option<ThemeMode> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match background {
        0..=6 | 8 => Some(ThemeMode::Dark),
        7 | 9..=15 => Some(ThemeMode::Light),
        _ => None,
    }
}

// ============================================================================
// ThemePreference
// ============================================================================

/// Single source of truth for the active theme.
pub struct ThemePreference {
    mode: ThemeMode,
    palette: Palette,
    store: Box<dyn PreferenceStore>,
}

impl ThemePreference {
    /// Resolves the startup theme and applies it.
    ///
    /// Never fails: unreadable or invalid persisted values and a missing
    /// system signal fall through to the next source.
    pub fn resolve(store: Box<dyn PreferenceStore>, appearance: &dyn SystemAppearance) -> Self {
        let persisted = match store.load() {
            Ok(Some(value)) => {
                let mode = ThemeMode::parse(&value);
                if mode.is_none() {
                    warn!(value = %value, "ignoring invalid persisted theme");
                }
                mode
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "theme preference unreadable");
                None
            }
        };

        let (mode, source) = match persisted {
            Some(mode) => (mode, "persisted"),
            None => match appearance.color_scheme() {
                Some(mode) => (mode, "system"),
                None => (ThemeMode::default(), "default"),
            },
        };
        debug!(mode = mode.as_str(), source, "theme resolved");

        let mut preference = Self {
            mode,
            palette: Palette::for_mode(mode),
            store,
        };
        preference.apply(mode);
        preference
    }

    /// Flips the theme, applies it, and persists it best-effort.
    ///
    /// Persistence failures are logged and swallowed; the in-memory mode is
    /// authoritative.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.mode.toggled();
        self.apply(next);
        if let Err(err) = self.store.save(next.as_str()) {
            warn!(error = %format!("{err:#}"), "failed to persist theme");
        }
        debug!(mode = next.as_str(), "theme toggled");
        next
    }

    fn apply(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.palette = Palette::for_mode(mode);
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Applied presentation palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Value currently in the backing store, if readable.
    pub fn persisted(&self) -> Option<ThemeMode> {
        self.store
            .load()
            .ok()
            .flatten()
            .and_then(|value| ThemeMode::parse(&value))
    }
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
