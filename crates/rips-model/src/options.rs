//! Run configuration consumed by the validation engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the engine does with correction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Validate only; the corrector never runs.
    #[default]
    ValidateOnly,
    /// Run correction rules and record them, but leave the data untouched.
    SuggestCorrections,
    /// Substitute `High` confidence corrections into the output; record the
    /// rest without applying them.
    AutoCorrect,
}

impl RunMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidateOnly => "validate-only",
            Self::SuggestCorrections => "suggest-corrections",
            Self::AutoCorrect => "auto-correct",
        }
    }

    /// True when correction rules should run at all.
    pub const fn corrections_enabled(&self) -> bool {
        !matches!(self, Self::ValidateOnly)
    }

    /// True when `High` confidence corrections are substituted into output.
    pub const fn applies_corrections(&self) -> bool {
        matches!(self, Self::AutoCorrect)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validate-only" | "validate" => Ok(Self::ValidateOnly),
            "suggest-corrections" | "suggest" => Ok(Self::SuggestCorrections),
            "auto-correct" | "auto" => Ok(Self::AutoCorrect),
            _ => Err(format!("unknown run mode: {s}")),
        }
    }
}

/// Engine configuration. Built once per run and injected explicitly; there
/// is no global configuration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Cutoff date for "no future date" checks and age derivation.
    pub reference_date: NaiveDate,
    /// Correction mode.
    pub mode: RunMode,
}

impl RunOptions {
    pub fn new(reference_date: NaiveDate, mode: RunMode) -> Self {
        Self {
            reference_date,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_parsing() {
        assert_eq!("validate-only".parse::<RunMode>().unwrap(), RunMode::ValidateOnly);
        assert_eq!("suggest".parse::<RunMode>().unwrap(), RunMode::SuggestCorrections);
        assert_eq!("auto-correct".parse::<RunMode>().unwrap(), RunMode::AutoCorrect);
        assert!("fix-everything".parse::<RunMode>().is_err());
    }

    #[test]
    fn test_mode_gates() {
        assert!(!RunMode::ValidateOnly.corrections_enabled());
        assert!(RunMode::SuggestCorrections.corrections_enabled());
        assert!(!RunMode::SuggestCorrections.applies_corrections());
        assert!(RunMode::AutoCorrect.applies_corrections());
    }
}
