//! Character roster
//!
//! Base stat profiles looked up by character name.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A character's starting stats before any items. Every other registered
/// stat starts at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseProfile {
    pub hp: f64,
    #[serde(default)]
    pub shields: f64,
    #[serde(default)]
    pub armor: f64,
}

impl BaseProfile {
    pub fn new(hp: f64, shields: f64, armor: f64) -> Self {
        Self { hp, shields, armor }
    }

    pub fn total_hp(&self) -> f64 {
        self.hp + self.shields + self.armor
    }
}

/// Errors from loading or validating a roster file.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("character '{0}' has a negative or non-finite base stat")]
    InvalidBaseStat(String),
    #[error("roster is empty")]
    Empty,
}

/// The set of playable characters and their base profiles.
///
/// Passed into searches explicitly; there is no process-wide character table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    characters: BTreeMap<String, BaseProfile>,
}

impl Roster {
    /// Build a roster from (name, profile) pairs, rejecting malformed
    /// base stats up front.
    pub fn new(
        characters: impl IntoIterator<Item = (String, BaseProfile)>,
    ) -> Result<Self, RosterError> {
        let characters: BTreeMap<String, BaseProfile> = characters.into_iter().collect();
        for (name, profile) in &characters {
            for value in [profile.hp, profile.shields, profile.armor] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RosterError::InvalidBaseStat(name.clone()));
                }
            }
        }
        Ok(Self { characters })
    }

    /// Load a roster from a RON file, failing fast on malformed data.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::from_ron_str(&content).map_err(|e| match e {
            RosterError::Parse { source, .. } => RosterError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(roster)
    }

    /// Parse a roster from RON text.
    pub fn from_ron_str(content: &str) -> Result<Self, RosterError> {
        let characters: BTreeMap<String, BaseProfile> =
            ron::from_str(content).map_err(|source| RosterError::Parse {
                path: PathBuf::from("<string>"),
                source,
            })?;
        if characters.is_empty() {
            return Err(RosterError::Empty);
        }
        Self::new(characters)
    }

    pub fn get(&self, character: &str) -> Option<&BaseProfile> {
        self.characters.get(character)
    }

    pub fn contains(&self, character: &str) -> bool {
        self.characters.contains_key(character)
    }

    /// Character names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// The built-in roster.
pub fn default_roster() -> Roster {
    let characters = [
        ("Juno", BaseProfile::new(75.0, 150.0, 0.0)),
        ("Kiriko", BaseProfile::new(225.0, 0.0, 0.0)),
        ("Mercy", BaseProfile::new(225.0, 0.0, 0.0)),
        ("Mei", BaseProfile::new(300.0, 0.0, 0.0)),
    ];
    Roster::new(characters.into_iter().map(|(n, p)| (n.to_string(), p)))
        .expect("built-in roster is valid")
}
