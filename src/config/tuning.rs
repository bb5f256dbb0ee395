// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Probability constants and weight tables for solo generation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SoloError};

/// Weights for middle-of-phrase note durations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationWeights {
    pub eighth: f64,
    pub sixteenth: f64,
    pub triplet: f64,
    pub dotted_eighth: f64,
}

impl DurationWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [self.eighth, self.sixteenth, self.triplet, self.dotted_eighth]
    }
}

impl Default for DurationWeights {
    fn default() -> Self {
        Self {
            eighth: 0.5,
            sixteenth: 0.3,
            triplet: 0.1,
            dotted_eighth: 0.1,
        }
    }
}

/// Weights for rest durations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestWeights {
    pub eighth: f64,
    pub sixteenth: f64,
    pub quarter: f64,
    pub half: f64,
}

impl RestWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [self.eighth, self.sixteenth, self.quarter, self.half]
    }
}

impl Default for RestWeights {
    fn default() -> Self {
        Self {
            eighth: 0.5,
            sixteenth: 0.1,
            quarter: 0.2,
            half: 0.2,
        }
    }
}

/// Tunable behavior of the phrase generator and sequence assembler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorTuning {
    /// Probability of a melodic move (vs free choice near the last note)
    pub melodic_move: f64,
    /// Probability that a melodic move is stepwise (vs a skip)
    pub stepwise: f64,
    /// Probability that a step is one degree (vs two)
    pub single_step: f64,
    /// Probability of keeping the current melodic direction
    pub keep_direction: f64,
    /// Semitone offsets a skip chooses from
    pub skip_intervals: Vec<i32>,
    /// Max semitone distance for free choice
    pub free_choice_range: i32,
    /// Max semitone distance for a repetition-avoiding alternative
    pub alternative_range: i32,
    /// Probability of replacing a repeated pitch
    pub avoid_repetition: f64,
    /// Probability of inserting a rest for an immediate repetition
    pub repetition_rest: f64,
    /// Probability of a quarter note opening a downbeat phrase
    pub downbeat_quarter: f64,
    /// Probability of an eighth note opening any other phrase
    pub opening_eighth: f64,
    /// Probability of an eighth note closing a phrase
    pub closing_eighth: f64,
    pub middle_weights: DurationWeights,
    pub rest_weights: RestWeights,
    /// Probability of a rest before a non-downbeat phrase
    pub measure_leading_rest: f64,
    /// Probability of a rest after the opening phrase of a measure
    pub between_phrase_rest: f64,
    pub min_phrase_len: usize,
    pub max_phrase_len: usize,
    pub history_len: usize,
    pub beats_per_measure: u32,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            melodic_move: 0.9,
            stepwise: 0.8,
            single_step: 0.9,
            keep_direction: 0.7,
            skip_intervals: vec![3, -3, 4, -4],
            free_choice_range: 5,
            alternative_range: 3,
            avoid_repetition: 0.8,
            repetition_rest: 0.6,
            downbeat_quarter: 0.8,
            opening_eighth: 0.7,
            closing_eighth: 0.7,
            middle_weights: DurationWeights::default(),
            rest_weights: RestWeights::default(),
            measure_leading_rest: 0.3,
            between_phrase_rest: 0.3,
            min_phrase_len: 2,
            max_phrase_len: 3,
            history_len: 8,
            beats_per_measure: 4,
        }
    }
}

fn invalid(name: &str, value: f64) -> SoloError {
    SoloError::InvalidProbability {
        name: name.to_string(),
        value,
    }
}

fn check_weights(name: &str, weights: &[f64]) -> Result<()> {
    if let Some(&w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(invalid(name, w));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(invalid(name, total));
    }
    Ok(())
}

impl GeneratorTuning {
    fn probabilities(&self) -> [(&'static str, f64); 11] {
        [
            ("melodic_move", self.melodic_move),
            ("stepwise", self.stepwise),
            ("single_step", self.single_step),
            ("keep_direction", self.keep_direction),
            ("avoid_repetition", self.avoid_repetition),
            ("repetition_rest", self.repetition_rest),
            ("downbeat_quarter", self.downbeat_quarter),
            ("opening_eighth", self.opening_eighth),
            ("closing_eighth", self.closing_eighth),
            ("measure_leading_rest", self.measure_leading_rest),
            ("between_phrase_rest", self.between_phrase_rest),
        ]
    }

    /// Check every value is usable by the generator
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.probabilities() {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(name, value));
            }
        }
        if self.free_choice_range < 0 {
            return Err(invalid("free_choice_range", self.free_choice_range as f64));
        }
        if self.alternative_range < 0 {
            return Err(invalid("alternative_range", self.alternative_range as f64));
        }
        if self.skip_intervals.is_empty() {
            return Err(invalid("skip_intervals", 0.0));
        }
        check_weights("middle_weights", &self.middle_weights.as_array())?;
        check_weights("rest_weights", &self.rest_weights.as_array())?;
        if self.min_phrase_len == 0 {
            return Err(invalid("min_phrase_len", 0.0));
        }
        if self.min_phrase_len > self.max_phrase_len {
            return Err(invalid("max_phrase_len", self.max_phrase_len as f64));
        }
        if self.history_len == 0 {
            return Err(invalid("history_len", 0.0));
        }
        if self.beats_per_measure == 0 {
            return Err(invalid("beats_per_measure", 0.0));
        }
        Ok(())
    }

    /// Set a parameter by name; unknown names are ignored
    pub fn set_param(&mut self, name: &str, value: f64) {
        match name {
            "melodic_move" => self.melodic_move = value.clamp(0.0, 1.0),
            "stepwise" => self.stepwise = value.clamp(0.0, 1.0),
            "single_step" => self.single_step = value.clamp(0.0, 1.0),
            "keep_direction" => self.keep_direction = value.clamp(0.0, 1.0),
            "free_choice_range" => self.free_choice_range = (value as i32).clamp(0, 24),
            "alternative_range" => self.alternative_range = (value as i32).clamp(0, 24),
            "avoid_repetition" => self.avoid_repetition = value.clamp(0.0, 1.0),
            "repetition_rest" => self.repetition_rest = value.clamp(0.0, 1.0),
            "downbeat_quarter" => self.downbeat_quarter = value.clamp(0.0, 1.0),
            "opening_eighth" => self.opening_eighth = value.clamp(0.0, 1.0),
            "closing_eighth" => self.closing_eighth = value.clamp(0.0, 1.0),
            "measure_leading_rest" => self.measure_leading_rest = value.clamp(0.0, 1.0),
            "between_phrase_rest" => self.between_phrase_rest = value.clamp(0.0, 1.0),
            "min_phrase_len" => {
                self.min_phrase_len = (value as usize).clamp(1, 16);
                self.max_phrase_len = self.max_phrase_len.max(self.min_phrase_len);
            }
            "max_phrase_len" => {
                self.max_phrase_len = (value as usize).clamp(1, 16);
                self.min_phrase_len = self.min_phrase_len.min(self.max_phrase_len);
            }
            "history_len" => self.history_len = (value as usize).clamp(1, 64),
            "beats_per_measure" => self.beats_per_measure = (value as u32).clamp(1, 16),
            _ => {}
        }
    }

    /// Get a parameter by name
    pub fn get_param(&self, name: &str) -> Option<f64> {
        match name {
            "melodic_move" => Some(self.melodic_move),
            "stepwise" => Some(self.stepwise),
            "single_step" => Some(self.single_step),
            "keep_direction" => Some(self.keep_direction),
            "free_choice_range" => Some(self.free_choice_range as f64),
            "alternative_range" => Some(self.alternative_range as f64),
            "avoid_repetition" => Some(self.avoid_repetition),
            "repetition_rest" => Some(self.repetition_rest),
            "downbeat_quarter" => Some(self.downbeat_quarter),
            "opening_eighth" => Some(self.opening_eighth),
            "closing_eighth" => Some(self.closing_eighth),
            "measure_leading_rest" => Some(self.measure_leading_rest),
            "between_phrase_rest" => Some(self.between_phrase_rest),
            "min_phrase_len" => Some(self.min_phrase_len as f64),
            "max_phrase_len" => Some(self.max_phrase_len as f64),
            "history_len" => Some(self.history_len as f64),
            "beats_per_measure" => Some(self.beats_per_measure as f64),
            _ => None,
        }
    }

    /// All scalar parameters with their current values
    pub fn params(&self) -> HashMap<String, f64> {
        const NAMES: [&str; 17] = [
            "melodic_move",
            "stepwise",
            "single_step",
            "keep_direction",
            "free_choice_range",
            "alternative_range",
            "avoid_repetition",
            "repetition_rest",
            "downbeat_quarter",
            "opening_eighth",
            "closing_eighth",
            "measure_leading_rest",
            "between_phrase_rest",
            "min_phrase_len",
            "max_phrase_len",
            "history_len",
            "beats_per_measure",
        ];
        NAMES
            .iter()
            .filter_map(|&name| self.get_param(name).map(|v| (name.to_string(), v)))
            .collect()
    }
}
