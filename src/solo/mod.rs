// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative solo engine.
//!
//! Produces scale-constrained melodic phrases and assembles them into
//! measures. Everything here is synchronous and call-scoped: the only
//! state that outlives a call is the generator's random source.

pub mod assembler;
pub mod event;
pub mod phrase;
pub mod queue;
pub mod random;

pub use assembler::{flatten, Measure};
pub use event::{
    total_ticks, Duration, History, NoteValue, RestValue, SoloEvent, DEFAULT_HISTORY_LEN,
    TICKS_PER_BEAT,
};
pub use phrase::{Direction, SoloGenerator};
pub use queue::SoloQueue;
pub use random::RandomSource;

use crate::error::Result;
use crate::music::ScaleSpace;

/// Generate one phrase with default tuning
///
/// Pass `&mut rng` to keep using a `rand` generator afterwards.
pub fn generate_phrase<R: RandomSource>(
    space: &ScaleSpace,
    history: &History,
    length: usize,
    is_downbeat: bool,
    rng: R,
) -> Result<Vec<SoloEvent>> {
    SoloGenerator::new(rng).generate_phrase(space, history, length, is_downbeat)
}

/// Generate a solo of `measure_count` measures with default tuning
pub fn generate_solo<R: RandomSource>(
    space: &ScaleSpace,
    measure_count: usize,
    rng: R,
) -> Result<Vec<SoloEvent>> {
    SoloGenerator::new(rng).generate_solo(space, measure_count)
}
