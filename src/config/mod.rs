// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for solo generation sessions.
//!
//! A session file names the scale to play over, how much to generate and
//! optionally overrides any of the generator's tuning constants. Files may
//! be YAML or TOML; the extension decides.

pub mod tuning;

pub use tuning::{DurationWeights, GeneratorTuning, RestWeights};

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::music::{build_scale_space, PitchClass, ScaleCategory, ScaleMode, ScaleSpace};
use crate::solo::queue::{DEFAULT_REFILL_MEASURES, DEFAULT_REFILL_THRESHOLD};

/// Root configuration for a generation session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SessionFile {
    /// Scale to generate over
    #[serde(default)]
    pub scale: ScaleSettings,
    /// Output size and seeding
    #[serde(default)]
    pub solo: SoloSettings,
    /// Generator tuning overrides
    #[serde(default)]
    pub tuning: GeneratorTuning,
}

impl SessionFile {
    /// Load a session from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        let session = if is_toml {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        if let Err(e) = session.validate() {
            warn!(path = ?path, "rejected session file: {:#}", e);
            return Err(e);
        }
        Ok(session)
    }

    /// Parse a session from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a session from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save session to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check the session can drive a generator
    pub fn validate(&self) -> Result<()> {
        if self.scale.note_count == 0 {
            bail!("scale.note_count must be at least 1");
        }
        if self.solo.measures == 0 {
            bail!("solo.measures must be at least 1");
        }
        if self.solo.refill_measures == 0 {
            bail!("solo.refill_measures must be at least 1");
        }
        self.tuning.validate().context("Invalid tuning")?;
        Ok(())
    }
}

/// Scale selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleSettings {
    #[serde(default = "default_root")]
    pub root: PitchClass,
    #[serde(default = "default_mode")]
    pub mode: ScaleMode,
    #[serde(default = "default_category")]
    pub category: ScaleCategory,
    #[serde(default = "default_start_octave")]
    pub start_octave: i32,
    /// Number of scale degrees in the generated space
    #[serde(default = "default_note_count")]
    pub note_count: usize,
}

fn default_root() -> PitchClass {
    PitchClass::C
}
fn default_mode() -> ScaleMode {
    ScaleMode::Major
}
fn default_category() -> ScaleCategory {
    ScaleCategory::Diatonic
}
fn default_start_octave() -> i32 {
    4
}
fn default_note_count() -> usize {
    8
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            mode: default_mode(),
            category: default_category(),
            start_octave: default_start_octave(),
            note_count: default_note_count(),
        }
    }
}

impl ScaleSettings {
    /// Build the scale space these settings describe
    pub fn build_space(&self) -> ScaleSpace {
        build_scale_space(
            self.root,
            self.mode,
            self.category,
            self.start_octave,
            self.note_count,
        )
    }
}

/// Output size, seeding and autoplay refill settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoloSettings {
    #[serde(default = "default_measures")]
    pub measures: usize,
    /// Fixed seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_refill_measures")]
    pub refill_measures: usize,
    #[serde(default = "default_refill_threshold")]
    pub refill_threshold: usize,
}

fn default_measures() -> usize {
    2
}
fn default_refill_measures() -> usize {
    DEFAULT_REFILL_MEASURES
}
fn default_refill_threshold() -> usize {
    DEFAULT_REFILL_THRESHOLD
}

impl Default for SoloSettings {
    fn default() -> Self {
        Self {
            measures: default_measures(),
            seed: None,
            refill_measures: default_refill_measures(),
            refill_threshold: default_refill_threshold(),
        }
    }
}
