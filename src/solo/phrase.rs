// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melodic phrase generation.
//!
//! A phrase is a short run of notes that continues from the last sounded
//! pitch in the history. Pitches favour stepwise motion in a persistent
//! direction, with occasional skips and free choices near the last note.
//! Immediate repetitions are steered away from, or replaced by an extra rest.
//! Durations depend on the note's position in the phrase, and triplets
//! always complete as groups of three.

use tracing::{debug, trace};

use crate::config::GeneratorTuning;
use crate::error::{Result, SoloError};
use crate::music::{nearest_in_scale, semitone_interval, step_in_scale, ScaleDegree, ScaleSpace};

use super::event::{History, NoteValue, RestValue, SoloEvent};
use super::random::RandomSource;

/// Notes per triplet group
const TRIPLET_GROUP: usize = 3;

/// Melodic direction carried between notes of one phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Neutral,
    Up,
}

impl Direction {
    /// Direction of a signed interval; zero keeps `current`
    pub fn of_interval(interval: i32, current: Direction) -> Direction {
        match interval.signum() {
            1 => Direction::Up,
            -1 => Direction::Down,
            _ => current,
        }
    }
}

/// Generates phrases and whole solos from a scale space
///
/// Holds the tuning and the random source; all other state is local to
/// a single call.
#[derive(Debug, Clone)]
pub struct SoloGenerator<R> {
    pub(crate) tuning: GeneratorTuning,
    pub(crate) rng: R,
}

impl<R: RandomSource> SoloGenerator<R> {
    /// Create a generator with default tuning
    pub fn new(rng: R) -> Self {
        Self {
            tuning: GeneratorTuning::default(),
            rng,
        }
    }

    /// Create a generator with validated tuning
    pub fn with_tuning(tuning: GeneratorTuning, rng: R) -> Result<Self> {
        tuning.validate()?;
        Ok(Self { tuning, rng })
    }

    /// Set a tuning parameter by name
    pub fn set_param(&mut self, name: &str, value: f64) {
        self.tuning.set_param(name, value);
    }

    pub fn get_param(&self, name: &str) -> Option<f64> {
        self.tuning.get_param(name)
    }

    /// Generate one phrase of exactly `length` notes
    ///
    /// Rests inserted for repeated pitches come on top of the `length`
    /// notes, so the returned run may be longer than `length`.
    pub fn generate_phrase(
        &mut self,
        space: &ScaleSpace,
        history: &History,
        length: usize,
        is_downbeat: bool,
    ) -> Result<Vec<SoloEvent>> {
        if space.is_empty() {
            return Err(SoloError::EmptyScaleSpace);
        }
        if length == 0 {
            return Err(SoloError::InvalidPhraseLength(length));
        }

        let mut last_note = match history.last_note() {
            Some(note) => note,
            None => space[self.rng.index(space.len())],
        };
        let mut direction = Direction::Neutral;
        let mut events: Vec<SoloEvent> = Vec::with_capacity(length + 2);
        let mut notes = 0usize;
        let mut triplet_run = 0usize;

        while notes < length {
            let mut candidate = self.choose_pitch(last_note, &mut direction, space)?;

            let immediate = previous_pitch(&events, history, 0) == Some(candidate);
            let pattern = previous_pitch(&events, history, 1) == Some(candidate);
            if (immediate || pattern) && self.rng.chance(self.tuning.avoid_repetition) {
                if let Some(alternative) = self.alternative_to(candidate, last_note, space) {
                    candidate = alternative;
                }
            }

            let value = self.choose_value(notes, length, is_downbeat, triplet_run);

            // An open triplet group must finish with consecutive notes
            if immediate && triplet_run == 0 && self.rng.chance(self.tuning.repetition_rest) {
                let rest = self.choose_rest();
                trace!(pitch = %candidate, "repeated pitch replaced by {}", rest);
                events.push(rest);
                continue;
            }

            triplet_run = if value == NoteValue::EighthTriplet {
                (triplet_run + 1) % TRIPLET_GROUP
            } else {
                0
            };
            events.push(SoloEvent::note(candidate, value));
            last_note = candidate;
            notes += 1;
        }

        debug!(
            length,
            is_downbeat,
            emitted = events.len(),
            "generated phrase"
        );
        Ok(events)
    }

    /// Draw a rest from the rest weight table
    pub fn choose_rest(&mut self) -> SoloEvent {
        let value = match self.rng.weighted(&self.tuning.rest_weights.as_array()) {
            0 => RestValue::Eighth,
            1 => RestValue::Sixteenth,
            2 => RestValue::Quarter,
            _ => RestValue::Half,
        };
        SoloEvent::rest(value)
    }

    fn choose_pitch(
        &mut self,
        last: ScaleDegree,
        direction: &mut Direction,
        space: &ScaleSpace,
    ) -> Result<ScaleDegree> {
        if !self.rng.chance(self.tuning.melodic_move) {
            return self.free_choice(last, direction, space);
        }

        if self.rng.chance(self.tuning.stepwise) {
            let step = if self.rng.chance(self.tuning.single_step) { 1 } else { 2 };
            let up = if *direction != Direction::Neutral && self.rng.chance(self.tuning.keep_direction) {
                *direction == Direction::Up
            } else {
                self.rng.chance(0.5)
            };
            let signed = if up { step } else { -step };
            let (next, applied) = self.step_within(last, signed, space)?;
            *direction = Direction::of_interval(applied, *direction);
            trace!(from = %last, to = %next, step = applied, "stepwise move");
            Ok(next)
        } else {
            let intervals = &self.tuning.skip_intervals;
            let interval = intervals[self.rng.index(intervals.len())];
            let next = nearest_in_scale(last.absolute() + interval, space)?;
            *direction = Direction::of_interval(interval, *direction);
            trace!(from = %last, to = %next, interval, "skip move");
            Ok(next)
        }
    }

    /// Step by scale degrees, reversing at the edges of the space
    ///
    /// A wrapped step is only taken if it stays inside the space and still
    /// moves in the requested direction. Returns the chosen pitch and the
    /// step actually applied.
    fn step_within(
        &self,
        last: ScaleDegree,
        steps: i32,
        space: &ScaleSpace,
    ) -> Result<(ScaleDegree, i32)> {
        let moves_toward = |next: ScaleDegree, steps: i32| {
            space.contains(&next) && semitone_interval(last, next).signum() == steps.signum()
        };
        let forward = step_in_scale(last, steps, space)?;
        if moves_toward(forward, steps) {
            return Ok((forward, steps));
        }
        let reversed = step_in_scale(last, -steps, space)?;
        if moves_toward(reversed, -steps) {
            return Ok((reversed, -steps));
        }
        let nearest = nearest_in_scale(forward.absolute(), space)?;
        Ok((nearest, semitone_interval(last, nearest)))
    }

    fn free_choice(
        &mut self,
        last: ScaleDegree,
        direction: &mut Direction,
        space: &ScaleSpace,
    ) -> Result<ScaleDegree> {
        let range = self.tuning.free_choice_range;
        let nearby: Vec<ScaleDegree> = space
            .iter()
            .copied()
            .filter(|&d| semitone_interval(last, d).abs() <= range)
            .collect();
        let next = if nearby.is_empty() {
            nearest_in_scale(last.absolute(), space)?
        } else {
            nearby[self.rng.index(nearby.len())]
        };
        *direction = Direction::of_interval(semitone_interval(last, next), *direction);
        trace!(from = %last, to = %next, "free choice");
        Ok(next)
    }

    /// A nearby pitch of a different pitch class, if any exists
    fn alternative_to(
        &mut self,
        candidate: ScaleDegree,
        last: ScaleDegree,
        space: &ScaleSpace,
    ) -> Option<ScaleDegree> {
        let range = self.tuning.alternative_range;
        let options: Vec<ScaleDegree> = space
            .iter()
            .copied()
            .filter(|d| {
                d.pitch_class != candidate.pitch_class && semitone_interval(last, *d).abs() <= range
            })
            .collect();
        if options.is_empty() {
            None
        } else {
            Some(options[self.rng.index(options.len())])
        }
    }

    fn choose_value(
        &mut self,
        position: usize,
        length: usize,
        is_downbeat: bool,
        triplet_run: usize,
    ) -> NoteValue {
        let t = &self.tuning;
        if position == 0 {
            if is_downbeat {
                if self.rng.chance(t.downbeat_quarter) {
                    NoteValue::Quarter
                } else {
                    NoteValue::Eighth
                }
            } else if self.rng.chance(t.opening_eighth) {
                NoteValue::Eighth
            } else {
                NoteValue::Sixteenth
            }
        } else if triplet_run > 0 {
            NoteValue::EighthTriplet
        } else if position == length - 1 {
            if self.rng.chance(t.closing_eighth) {
                NoteValue::Eighth
            } else {
                NoteValue::Sixteenth
            }
        } else {
            match self.rng.weighted(&t.middle_weights.as_array()) {
                0 => NoteValue::Eighth,
                1 => NoteValue::Sixteenth,
                2 if length - 1 - position >= TRIPLET_GROUP - 1 => NoteValue::EighthTriplet,
                2 => NoteValue::Eighth,
                _ => NoteValue::DottedEighth,
            }
        }
    }
}

/// Pitch of the event `back` places before the next one, looking through
/// the phrase so far and then the history; rests yield `None`
fn previous_pitch(events: &[SoloEvent], history: &History, back: usize) -> Option<ScaleDegree> {
    let event = if back < events.len() {
        events.get(events.len() - 1 - back)
    } else {
        history.nth_back(back - events.len())
    };
    event.and_then(SoloEvent::pitch)
}
