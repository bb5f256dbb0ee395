// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Solo events, symbolic durations and the rolling history buffer.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::ScaleDegree;

/// Ticks per quarter note; divisible by both 3 (triplets) and 4 (sixteenths)
pub const TICKS_PER_BEAT: u32 = 24;

/// Default number of events kept in a [`History`]
pub const DEFAULT_HISTORY_LEN: usize = 8;

/// Every symbolic duration a solo event can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    #[serde(rename = "4n")]
    Quarter,
    #[serde(rename = "8n")]
    Eighth,
    #[serde(rename = "16n")]
    Sixteenth,
    #[serde(rename = "8t")]
    EighthTriplet,
    #[serde(rename = "4n.")]
    DottedQuarter,
    #[serde(rename = "8n.")]
    DottedEighth,
    #[serde(rename = "4r")]
    QuarterRest,
    #[serde(rename = "8r")]
    EighthRest,
    #[serde(rename = "16r")]
    SixteenthRest,
    #[serde(rename = "2r")]
    HalfRest,
}

impl Duration {
    /// Length in ticks (see [`TICKS_PER_BEAT`])
    pub fn ticks(self) -> u32 {
        match self {
            Duration::Quarter | Duration::QuarterRest => TICKS_PER_BEAT,
            Duration::Eighth | Duration::EighthRest => TICKS_PER_BEAT / 2,
            Duration::Sixteenth | Duration::SixteenthRest => TICKS_PER_BEAT / 4,
            Duration::EighthTriplet => TICKS_PER_BEAT / 3,
            Duration::DottedQuarter => TICKS_PER_BEAT * 3 / 2,
            Duration::DottedEighth => TICKS_PER_BEAT * 3 / 4,
            Duration::HalfRest => TICKS_PER_BEAT * 2,
        }
    }

    /// Length in beats (quarter note = 1)
    pub fn beats(self) -> f64 {
        self.ticks() as f64 / TICKS_PER_BEAT as f64
    }

    pub fn is_rest(self) -> bool {
        matches!(
            self,
            Duration::QuarterRest
                | Duration::EighthRest
                | Duration::SixteenthRest
                | Duration::HalfRest
        )
    }

    /// Short notation name ("4n", "8t", "2r", ...)
    pub fn notation(self) -> &'static str {
        match self {
            Duration::Quarter => "4n",
            Duration::Eighth => "8n",
            Duration::Sixteenth => "16n",
            Duration::EighthTriplet => "8t",
            Duration::DottedQuarter => "4n.",
            Duration::DottedEighth => "8n.",
            Duration::QuarterRest => "4r",
            Duration::EighthRest => "8r",
            Duration::SixteenthRest => "16r",
            Duration::HalfRest => "2r",
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// Durations a sounded note may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteValue {
    Quarter,
    Eighth,
    Sixteenth,
    EighthTriplet,
    DottedQuarter,
    DottedEighth,
}

impl NoteValue {
    pub fn duration(self) -> Duration {
        match self {
            NoteValue::Quarter => Duration::Quarter,
            NoteValue::Eighth => Duration::Eighth,
            NoteValue::Sixteenth => Duration::Sixteenth,
            NoteValue::EighthTriplet => Duration::EighthTriplet,
            NoteValue::DottedQuarter => Duration::DottedQuarter,
            NoteValue::DottedEighth => Duration::DottedEighth,
        }
    }
}

/// Durations a rest may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestValue {
    Quarter,
    Eighth,
    Sixteenth,
    Half,
}

impl RestValue {
    pub fn duration(self) -> Duration {
        match self {
            RestValue::Quarter => Duration::QuarterRest,
            RestValue::Eighth => Duration::EighthRest,
            RestValue::Sixteenth => Duration::SixteenthRest,
            RestValue::Half => Duration::HalfRest,
        }
    }
}

/// One step of a solo: a sounded pitch or a rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoloEvent {
    Note { pitch: ScaleDegree, value: NoteValue },
    Rest(RestValue),
}

impl SoloEvent {
    pub fn note(pitch: ScaleDegree, value: NoteValue) -> Self {
        SoloEvent::Note { pitch, value }
    }

    pub fn rest(value: RestValue) -> Self {
        SoloEvent::Rest(value)
    }

    /// The sounded pitch, or `None` for a rest
    pub fn pitch(&self) -> Option<ScaleDegree> {
        match self {
            SoloEvent::Note { pitch, .. } => Some(*pitch),
            SoloEvent::Rest(_) => None,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            SoloEvent::Note { value, .. } => value.duration(),
            SoloEvent::Rest(value) => value.duration(),
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, SoloEvent::Rest(_))
    }

    pub fn ticks(&self) -> u32 {
        self.duration().ticks()
    }

    pub fn beats(&self) -> f64 {
        self.duration().beats()
    }
}

impl fmt::Display for SoloEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoloEvent::Note { pitch, value } => write!(f, "{} {}", pitch, value.duration()),
            SoloEvent::Rest(value) => write!(f, "rest {}", value.duration()),
        }
    }
}

/// Total length of a run of events, in ticks
pub fn total_ticks(events: &[SoloEvent]) -> u32 {
    events.iter().map(SoloEvent::ticks).sum()
}

/// Bounded buffer of the most recently emitted events
///
/// Oldest events are evicted once `capacity` is exceeded.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    events: VecDeque<SoloEvent>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, event: SoloEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    pub fn extend<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a SoloEvent>,
    {
        for event in events {
            self.push(*event);
        }
    }

    /// Most recent sounded pitch, skipping rests
    pub fn last_note(&self) -> Option<ScaleDegree> {
        self.events.iter().rev().find_map(SoloEvent::pitch)
    }

    /// Event `n` places back from the newest (0 = newest)
    pub fn nth_back(&self, n: usize) -> Option<&SoloEvent> {
        self.events.iter().rev().nth(n)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoloEvent> {
        self.events.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}
