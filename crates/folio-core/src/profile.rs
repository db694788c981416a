//! Portfolio content.
//!
//! Inert data rendered by the page: a bundled default compiled into the
//! binary, replaceable by a user TOML file with the same shape.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the embedded default profile.
pub fn bundled_profile_toml() -> &'static str {
    include_str!("../assets/profile.toml")
}

/// Title/description pair used by expertise and stack cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    /// Two-part heading (plain, accent).
    pub title: Vec<String>,
    pub paragraphs: Vec<String>,
    pub expertise: Vec<Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    pub title: Vec<String>,
    pub intro: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stack {
    pub title: Vec<String>,
    pub intro: String,
    pub groups: Vec<Card>,
    pub cloud_title: String,
    pub cloud_summary: String,
    /// Badges revealed one after another once the headline settles.
    pub cloud_services: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub title: Vec<String>,
    pub intro: String,
    pub email: Option<String>,
    /// Display form; dialed without its separators.
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

impl Contact {
    pub fn mailto(&self) -> Option<String> {
        self.email.as_ref().map(|email| format!("mailto:{email}"))
    }

    pub fn tel(&self) -> Option<String> {
        let phone = self.phone.as_ref()?;
        let digits: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        (!digits.is_empty()).then(|| format!("tel:{digits}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub availability: String,
    pub copyright: String,
    pub crafted: String,
}

/// Everything the page displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Monogram shown in the header.
    #[serde(default)]
    pub initial: String,
    #[serde(default)]
    pub location: String,
    /// Text typed by the reveal sequence.
    pub headline: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub stack: Stack,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub footer: Footer,
}

impl Profile {
    /// Parses the bundled profile.
    pub fn bundled() -> Result<Self> {
        toml::from_str(bundled_profile_toml()).context("Failed to parse bundled profile")
    }

    /// Loads `path` if given, otherwise the bundled profile.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Self::bundled();
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse profile from {}", path.display()))
    }
}
