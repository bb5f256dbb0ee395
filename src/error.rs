// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error type shared by the scale and solo generation layers.

use thiserror::Error;

/// Errors raised by scale construction, generation and tuning validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SoloError {
    #[error("scale space is empty; at least one scale degree is required")]
    EmptyScaleSpace,

    #[error("phrase length must be at least 1 (got {0})")]
    InvalidPhraseLength(usize),

    #[error("measure count must be at least 1 (got {0})")]
    InvalidMeasureCount(usize),

    #[error("invalid tuning value for '{name}': {value}")]
    InvalidProbability { name: String, value: f64 },

    #[error("unknown pitch class: {0}")]
    UnknownPitchClass(String),

    #[error("unknown scale mode: {0}")]
    UnknownMode(String),

    #[error("unknown scale category: {0}")]
    UnknownCategory(String),
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, SoloError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SoloError::InvalidPhraseLength(0).to_string(),
            "phrase length must be at least 1 (got 0)"
        );
        let err = SoloError::InvalidProbability {
            name: "stepwise".to_string(),
            value: 1.5,
        };
        assert_eq!(err.to_string(), "invalid tuning value for 'stepwise': 1.5");
        assert_eq!(
            SoloError::UnknownPitchClass("H".to_string()).to_string(),
            "unknown pitch class: H"
        );
    }
}
