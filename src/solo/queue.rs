// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Continuous event feed for an autoplay loop.
//!
//! The queue hands out one event at a time and appends a freshly generated
//! block whenever playback gets close to the end of what is buffered.

use tracing::debug;

use crate::error::{Result, SoloError};
use crate::music::ScaleSpace;

use super::event::SoloEvent;
use super::phrase::SoloGenerator;
use super::random::RandomSource;

/// Measures generated per refill
pub const DEFAULT_REFILL_MEASURES: usize = 2;

/// Refill once this many events or fewer remain
pub const DEFAULT_REFILL_THRESHOLD: usize = 4;

/// Endless solo feed over a fixed scale space
#[derive(Debug)]
pub struct SoloQueue<R> {
    generator: SoloGenerator<R>,
    space: ScaleSpace,
    events: Vec<SoloEvent>,
    cursor: usize,
    refill_measures: usize,
    refill_threshold: usize,
}

impl<R: RandomSource> SoloQueue<R> {
    /// Create a queue and generate its first block
    pub fn new(generator: SoloGenerator<R>, space: ScaleSpace) -> Result<Self> {
        Self::with_refill(
            generator,
            space,
            DEFAULT_REFILL_MEASURES,
            DEFAULT_REFILL_THRESHOLD,
        )
    }

    pub fn with_refill(
        generator: SoloGenerator<R>,
        space: ScaleSpace,
        refill_measures: usize,
        refill_threshold: usize,
    ) -> Result<Self> {
        if refill_measures == 0 {
            return Err(SoloError::InvalidMeasureCount(refill_measures));
        }
        let mut queue = Self {
            generator,
            space,
            events: Vec::new(),
            cursor: 0,
            refill_measures,
            refill_threshold,
        };
        queue.regenerate()?;
        Ok(queue)
    }

    /// Take the next event, refilling the buffer when it runs low
    pub fn next_event(&mut self) -> Result<SoloEvent> {
        self.top_up()?;
        let event = self.events[self.cursor];
        self.cursor += 1;
        self.top_up()?;
        Ok(event)
    }

    /// Discard everything buffered and start a new solo
    pub fn regenerate(&mut self) -> Result<()> {
        self.events = self
            .generator
            .generate_solo(&self.space, self.refill_measures)?;
        self.cursor = 0;
        debug!(events = self.events.len(), "regenerated solo queue");
        Ok(())
    }

    /// Swap the scale space (e.g. after a key change) and regenerate
    pub fn set_space(&mut self, space: ScaleSpace) -> Result<()> {
        if space.is_empty() {
            return Err(SoloError::EmptyScaleSpace);
        }
        self.space = space;
        self.regenerate()
    }

    /// Events not yet handed out
    pub fn upcoming(&self) -> &[SoloEvent] {
        &self.events[self.cursor..]
    }

    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }

    pub fn space(&self) -> &ScaleSpace {
        &self.space
    }

    /// Live access for tuning changes; call `regenerate` to apply them at once
    pub fn generator_mut(&mut self) -> &mut SoloGenerator<R> {
        &mut self.generator
    }

    fn top_up(&mut self) -> Result<()> {
        while self.remaining() <= self.refill_threshold {
            let fresh = self
                .generator
                .generate_solo(&self.space, self.refill_measures)?;
            self.events.drain(..self.cursor);
            self.cursor = 0;
            self.events.extend(fresh);
            debug!(buffered = self.events.len(), "refilled solo queue");
        }
        Ok(())
    }
}
