// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for the solo generator.
//!
//! This module provides scale patterns, octave-annotated scale spaces
//! and interval arithmetic over them.

pub mod interval;
pub mod scale;

pub use interval::{nearest_in_scale, position_in_scale, semitone_interval, step_in_scale};
pub use scale::{
    build_scale_space, scale_name, scale_pitch_classes, PitchClass, ScaleCategory, ScaleDegree,
    ScaleMode, ScaleSpace,
};
