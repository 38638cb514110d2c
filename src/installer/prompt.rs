//! Mod name guesses and the confirmation slot used by interactive hosts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence of a name guess, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessQuality {
    Invalid,
    Fallback,
    Good,
    Meta,
    Preset,
    User,
}

/// Candidate names for a mod, each tagged with its quality
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessedName {
    variants: Vec<(String, GuessQuality)>,
}

impl GuessedName {
    pub fn new(name: impl Into<String>, quality: GuessQuality) -> Self {
        let mut guessed = Self::default();
        guessed.update(name, quality);
        guessed
    }

    /// Record a guess. Blank names and `Invalid` guesses are ignored.
    ///
    /// Guessing a known name again keeps the higher of the two qualities.
    pub fn update(&mut self, name: impl Into<String>, quality: GuessQuality) {
        let name = name.into().trim().to_string();
        if name.is_empty() || quality == GuessQuality::Invalid {
            return;
        }
        let mut quality = quality;
        self.variants.retain(|(existing, previous)| {
            if *existing == name {
                quality = quality.max(*previous);
                false
            } else {
                true
            }
        });
        self.variants.push((name, quality));
    }

    /// Highest-quality guess; the most recent one wins ties
    pub fn best(&self) -> Option<&str> {
        self.best_entry().map(|(name, _)| name.as_str())
    }

    pub fn quality(&self) -> GuessQuality {
        self.best_entry()
            .map(|(_, quality)| *quality)
            .unwrap_or(GuessQuality::Invalid)
    }

    fn best_entry(&self) -> Option<&(String, GuessQuality)> {
        self.variants.iter().max_by_key(|(_, quality)| *quality)
    }

    /// Every distinct guess, oldest first
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Display for GuessedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.best().unwrap_or(""))
    }
}

/// Answer of the host to an install confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptDecision {
    /// Install under the given name
    Accept(String),
    /// Hand the archive to the manual installer, keeping the given name
    Manual(String),
    Cancel,
}

/// Confirmation hook implemented by the host (dialog, CLI flags, tests)
pub trait InstallPrompt {
    fn confirm(&mut self, name: &GuessedName) -> PromptDecision;
}

/// Accepts every install under the best guessed name
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoAccept;

impl InstallPrompt for AutoAccept {
    fn confirm(&mut self, name: &GuessedName) -> PromptDecision {
        PromptDecision::Accept(name.best().unwrap_or_default().to_string())
    }
}
