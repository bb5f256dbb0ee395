// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale-constrained melodic solo generator.
//!
//! Builds a bounded space of scale degrees from a root, mode and scale
//! category, then generates short phrases inside it and assembles them
//! into measures for an autoplay loop.

pub mod config;
pub mod error;
pub mod music;
pub mod solo;

pub use error::{Result, SoloError};
