// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Assembly of phrases into measures and whole solos.
//!
//! Each measure opens with a phrase (a downbeat phrase for the first
//! measure), may take a rest after it, then keeps adding short phrases
//! until its own events cover at least a full measure. Overshoot past the
//! bar line is kept and is not credited to the following measure.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SoloError};
use crate::music::ScaleSpace;

use super::event::{total_ticks, History, SoloEvent, TICKS_PER_BEAT};
use super::phrase::SoloGenerator;
use super::random::RandomSource;

/// Events generated for one measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Measure index (0-based)
    pub index: usize,
    pub events: Vec<SoloEvent>,
}

impl Measure {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            events: Vec::new(),
        }
    }

    /// Total length in ticks
    pub fn ticks(&self) -> u32 {
        total_ticks(&self.events)
    }

    /// Total length in beats
    pub fn beats(&self) -> f64 {
        self.ticks() as f64 / TICKS_PER_BEAT as f64
    }
}

/// Flatten measures into a single event sequence
pub fn flatten(measures: &[Measure]) -> Vec<SoloEvent> {
    measures
        .iter()
        .flat_map(|m| m.events.iter().copied())
        .collect()
}

impl<R: RandomSource> SoloGenerator<R> {
    /// Generate `measure_count` measures, each covering at least one full bar
    pub fn generate_measures(
        &mut self,
        space: &ScaleSpace,
        measure_count: usize,
    ) -> Result<Vec<Measure>> {
        if space.is_empty() {
            return Err(SoloError::EmptyScaleSpace);
        }
        if measure_count == 0 {
            return Err(SoloError::InvalidMeasureCount(measure_count));
        }
        self.tuning.validate()?;

        let bar_ticks = self.tuning.beats_per_measure * TICKS_PER_BEAT;
        let mut history = History::new(self.tuning.history_len);
        let mut measures = Vec::with_capacity(measure_count);

        for index in 0..measure_count {
            let mut measure = Measure::new(index);

            if index == 0 {
                self.add_phrase(space, &mut history, &mut measure, true)?;
            } else {
                self.add_leading_phrase(space, &mut history, &mut measure)?;
            }

            if self.rng.chance(self.tuning.between_phrase_rest) {
                self.add_rest(&mut history, &mut measure);
            }

            while measure.ticks() < bar_ticks {
                self.add_leading_phrase(space, &mut history, &mut measure)?;
            }

            debug!(
                measure = index,
                events = measure.events.len(),
                beats = measure.beats(),
                "filled measure"
            );
            measures.push(measure);
        }

        info!(
            measures = measures.len(),
            events = measures.iter().map(|m| m.events.len()).sum::<usize>(),
            "generated solo"
        );
        Ok(measures)
    }

    /// Generate a solo of `measure_count` measures as one event sequence
    pub fn generate_solo(
        &mut self,
        space: &ScaleSpace,
        measure_count: usize,
    ) -> Result<Vec<SoloEvent>> {
        self.generate_measures(space, measure_count)
            .map(|measures| flatten(&measures))
    }

    fn phrase_length(&mut self) -> usize {
        let min = self.tuning.min_phrase_len;
        let span = self.tuning.max_phrase_len - min + 1;
        min + self.rng.index(span)
    }

    /// Non-downbeat phrase, preceded by a rest some of the time
    fn add_leading_phrase(
        &mut self,
        space: &ScaleSpace,
        history: &mut History,
        measure: &mut Measure,
    ) -> Result<()> {
        if self.rng.chance(self.tuning.measure_leading_rest) {
            self.add_rest(history, measure);
        }
        self.add_phrase(space, history, measure, false)
    }

    fn add_phrase(
        &mut self,
        space: &ScaleSpace,
        history: &mut History,
        measure: &mut Measure,
        is_downbeat: bool,
    ) -> Result<()> {
        let length = self.phrase_length();
        let phrase = self.generate_phrase(space, history, length, is_downbeat)?;
        history.extend(&phrase);
        measure.events.extend(phrase);
        Ok(())
    }

    fn add_rest(&mut self, history: &mut History, measure: &mut Measure) {
        let rest = self.choose_rest();
        history.push(rest);
        measure.events.push(rest);
    }
}
