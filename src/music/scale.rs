// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale patterns and octave-annotated scale spaces.
//!
//! Provides pitch classes, the six supported (mode, category) interval
//! patterns, absolute scale degrees and the ascending scale space the
//! solo generator draws its pitches from.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SoloError;

/// Concert pitch reference (A4) in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Pitch classes in chromatic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    #[serde(rename = "C#", alias = "Db")]
    Cs, // C# / Db
    D,
    #[serde(rename = "D#", alias = "Eb")]
    Ds, // D# / Eb
    E,
    F,
    #[serde(rename = "F#", alias = "Gb")]
    Fs, // F# / Gb
    G,
    #[serde(rename = "G#", alias = "Ab")]
    Gs, // G# / Ab
    A,
    #[serde(rename = "A#", alias = "Bb")]
    As, // A# / Bb
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Chromatic index (0-11), C = 0
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Get pitch class from a chromatic index (wraps modulo 12)
    pub fn from_index(index: u8) -> Self {
        PitchClass::ALL[(index % 12) as usize]
    }

    /// Transpose by semitones, ignoring octave
    pub fn transpose(self, semitones: i32) -> Self {
        let index = (self.index() as i32 + semitones).rem_euclid(12) as u8;
        PitchClass::from_index(index)
    }

    /// Sharp-spelled name ("C", "C#", ...)
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }
}

impl FromStr for PitchClass {
    type Err = SoloError;

    /// Parse a pitch class (e.g., "C", "C#", "Db", "F#")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "C" | "B#" | "BS" => Ok(PitchClass::C),
            "C#" | "CS" | "DB" => Ok(PitchClass::Cs),
            "D" => Ok(PitchClass::D),
            "D#" | "DS" | "EB" => Ok(PitchClass::Ds),
            "E" | "FB" => Ok(PitchClass::E),
            "F" | "E#" | "ES" => Ok(PitchClass::F),
            "F#" | "FS" | "GB" => Ok(PitchClass::Fs),
            "G" => Ok(PitchClass::G),
            "G#" | "GS" | "AB" => Ok(PitchClass::Gs),
            "A" => Ok(PitchClass::A),
            "A#" | "AS" | "BB" => Ok(PitchClass::As),
            "B" | "CB" => Ok(PitchClass::B),
            _ => Err(SoloError::UnknownPitchClass(s.to_string())),
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    Major,
    Minor,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 2] = [ScaleMode::Major, ScaleMode::Minor];

    pub fn name(self) -> &'static str {
        match self {
            ScaleMode::Major => "Major",
            ScaleMode::Minor => "Minor",
        }
    }
}

impl FromStr for ScaleMode {
    type Err = SoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" | "ionian" => Ok(ScaleMode::Major),
            "minor" | "aeolian" | "naturalminor" | "natural_minor" => Ok(ScaleMode::Minor),
            _ => Err(SoloError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale family; together with a mode it selects an interval pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleCategory {
    Diatonic,
    Pentatonic,
    Blues,
}

impl ScaleCategory {
    pub const ALL: [ScaleCategory; 3] = [
        ScaleCategory::Diatonic,
        ScaleCategory::Pentatonic,
        ScaleCategory::Blues,
    ];

    /// Get the intervals (semitones from root) for this category in a mode
    pub fn intervals(self, mode: ScaleMode) -> &'static [u8] {
        match (mode, self) {
            (ScaleMode::Major, ScaleCategory::Diatonic) => &[0, 2, 4, 5, 7, 9, 11],
            (ScaleMode::Minor, ScaleCategory::Diatonic) => &[0, 2, 3, 5, 7, 8, 10],
            (ScaleMode::Major, ScaleCategory::Pentatonic) => &[0, 2, 4, 7, 9],
            (ScaleMode::Minor, ScaleCategory::Pentatonic) => &[0, 3, 5, 7, 10],
            (ScaleMode::Major, ScaleCategory::Blues) => &[0, 2, 3, 4, 7, 9],
            (ScaleMode::Minor, ScaleCategory::Blues) => &[0, 3, 5, 6, 7, 10],
        }
    }

    /// Number of degrees per octave for this category in a mode
    pub fn degree_count(self, mode: ScaleMode) -> usize {
        self.intervals(mode).len()
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleCategory::Diatonic => "Diatonic",
            ScaleCategory::Pentatonic => "Pentatonic",
            ScaleCategory::Blues => "Blues",
        }
    }
}

impl FromStr for ScaleCategory {
    type Err = SoloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diatonic" => Ok(ScaleCategory::Diatonic),
            "pentatonic" => Ok(ScaleCategory::Pentatonic),
            "blues" => Ok(ScaleCategory::Blues),
            _ => Err(SoloError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for ScaleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pitch classes of a scale, root first
pub fn scale_pitch_classes(
    root: PitchClass,
    mode: ScaleMode,
    category: ScaleCategory,
) -> Vec<PitchClass> {
    category
        .intervals(mode)
        .iter()
        .map(|&i| root.transpose(i as i32))
        .collect()
}

/// Human-readable scale name, e.g. "C Major Diatonic"
pub fn scale_name(root: PitchClass, mode: ScaleMode, category: ScaleCategory) -> String {
    format!("{} {} {}", root, mode, category)
}

/// An absolute pitch: pitch class plus octave
///
/// Octaves are unbounded; playback is responsible for clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleDegree {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl ScaleDegree {
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    /// Semitones above C0
    pub fn absolute(self) -> i32 {
        self.octave * 12 + self.pitch_class.index() as i32
    }

    /// Same pitch class, shifted by whole octaves
    pub fn shift_octaves(self, octaves: i32) -> Self {
        Self::new(self.pitch_class, self.octave + octaves)
    }

    /// Equal-tempered frequency in Hz (A4 = 440)
    pub fn frequency(self) -> f64 {
        let a4 = ScaleDegree::new(PitchClass::A, 4).absolute();
        let half_steps = self.absolute() - a4;
        A4_FREQUENCY * 2f64.powf(half_steps as f64 / 12.0)
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

/// Ascending, duplicate-free sequence of scale degrees
///
/// Serialized as a plain list; deserialized lists are sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ScaleDegree>", into = "Vec<ScaleDegree>")]
pub struct ScaleSpace {
    degrees: Vec<ScaleDegree>,
}

impl From<Vec<ScaleDegree>> for ScaleSpace {
    fn from(degrees: Vec<ScaleDegree>) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<ScaleSpace> for Vec<ScaleDegree> {
    fn from(space: ScaleSpace) -> Self {
        space.degrees
    }
}

impl ScaleSpace {
    /// Build a scale space by walking a pattern `count` steps from `start_octave`
    ///
    /// The octave advances whenever the chromatic index fails to rise, so
    /// the result ascends even though the pattern wraps. `count == 0`
    /// yields an empty space.
    pub fn build(
        root: PitchClass,
        mode: ScaleMode,
        category: ScaleCategory,
        start_octave: i32,
        count: usize,
    ) -> Self {
        let pattern = scale_pitch_classes(root, mode, category);
        let mut degrees = Vec::with_capacity(count);
        let mut octave = start_octave;
        let mut last_index: Option<u8> = None;

        for i in 0..count {
            let pitch_class = pattern[i % pattern.len()];
            let index = pitch_class.index();
            if let Some(last) = last_index {
                if index <= last {
                    octave += 1;
                }
            }
            last_index = Some(index);
            degrees.push(ScaleDegree::new(pitch_class, octave));
        }

        Self { degrees }
    }

    /// Create a scale space from arbitrary degrees, sorted and deduplicated
    pub fn from_degrees(mut degrees: Vec<ScaleDegree>) -> Self {
        degrees.sort_by_key(|d| d.absolute());
        degrees.dedup();
        Self { degrees }
    }

    /// Get the degrees in ascending order
    pub fn degrees(&self) -> &[ScaleDegree] {
        &self.degrees
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Check if an absolute pitch is part of this space
    pub fn contains(&self, degree: &ScaleDegree) -> bool {
        self.degrees.contains(degree)
    }

    /// Check if a pitch class occurs anywhere in this space
    pub fn contains_pitch_class(&self, pitch_class: PitchClass) -> bool {
        self.degrees.iter().any(|d| d.pitch_class == pitch_class)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScaleDegree> {
        self.degrees.iter()
    }
}

impl Index<usize> for ScaleSpace {
    type Output = ScaleDegree;

    fn index(&self, index: usize) -> &Self::Output {
        &self.degrees[index]
    }
}

impl<'a> IntoIterator for &'a ScaleSpace {
    type Item = &'a ScaleDegree;
    type IntoIter = std::slice::Iter<'a, ScaleDegree>;

    fn into_iter(self) -> Self::IntoIter {
        self.degrees.iter()
    }
}

impl fmt::Display for ScaleSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.degrees.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}]", names.join(" "))
    }
}

/// Build an octave-annotated scale space
pub fn build_scale_space(
    root: PitchClass,
    mode: ScaleMode,
    category: ScaleCategory,
    start_octave: i32,
    count: usize,
) -> ScaleSpace {
    ScaleSpace::build(root, mode, category, start_octave, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(pc: PitchClass, octave: i32) -> ScaleDegree {
        ScaleDegree::new(pc, octave)
    }

    #[test]
    fn test_pitch_class_index() {
        assert_eq!(PitchClass::C.index(), 0);
        assert_eq!(PitchClass::A.index(), 9);
        assert_eq!(PitchClass::B.index(), 11);
        assert_eq!(PitchClass::from_index(13), PitchClass::Cs);
    }

    #[test]
    fn test_pitch_class_from_str() {
        assert_eq!("C".parse::<PitchClass>(), Ok(PitchClass::C));
        assert_eq!("C#".parse::<PitchClass>(), Ok(PitchClass::Cs));
        assert_eq!("Db".parse::<PitchClass>(), Ok(PitchClass::Cs));
        assert_eq!("bb".parse::<PitchClass>(), Ok(PitchClass::As));
        assert_eq!(
            "X".parse::<PitchClass>(),
            Err(SoloError::UnknownPitchClass("X".to_string()))
        );
    }

    #[test]
    fn test_pitch_class_transpose() {
        assert_eq!(PitchClass::C.transpose(2), PitchClass::D);
        assert_eq!(PitchClass::C.transpose(12), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
    }

    #[test]
    fn test_mode_and_category_from_str() {
        assert_eq!("Major".parse::<ScaleMode>(), Ok(ScaleMode::Major));
        assert_eq!("minor".parse::<ScaleMode>(), Ok(ScaleMode::Minor));
        assert!("dorian".parse::<ScaleMode>().is_err());
        assert_eq!("blues".parse::<ScaleCategory>(), Ok(ScaleCategory::Blues));
        assert!("bebop".parse::<ScaleCategory>().is_err());
    }

    #[test]
    fn test_pattern_sizes() {
        assert_eq!(ScaleCategory::Diatonic.degree_count(ScaleMode::Major), 7);
        assert_eq!(ScaleCategory::Pentatonic.degree_count(ScaleMode::Minor), 5);
        assert_eq!(ScaleCategory::Blues.degree_count(ScaleMode::Minor), 6);
        assert_eq!(ScaleCategory::Blues.degree_count(ScaleMode::Major), 6);
    }

    #[test]
    fn test_scale_pitch_classes() {
        let a_minor = scale_pitch_classes(PitchClass::A, ScaleMode::Minor, ScaleCategory::Diatonic);
        assert_eq!(
            a_minor,
            vec![
                PitchClass::A,
                PitchClass::B,
                PitchClass::C,
                PitchClass::D,
                PitchClass::E,
                PitchClass::F,
                PitchClass::G
            ]
        );
    }

    #[test]
    fn test_scale_name() {
        assert_eq!(
            scale_name(PitchClass::Fs, ScaleMode::Minor, ScaleCategory::Blues),
            "F# Minor Blues"
        );
    }

    #[test]
    fn test_build_c_major() {
        let space = build_scale_space(PitchClass::C, ScaleMode::Major, ScaleCategory::Diatonic, 4, 8);
        assert_eq!(
            space.degrees(),
            &[
                deg(PitchClass::C, 4),
                deg(PitchClass::D, 4),
                deg(PitchClass::E, 4),
                deg(PitchClass::F, 4),
                deg(PitchClass::G, 4),
                deg(PitchClass::A, 4),
                deg(PitchClass::B, 4),
                deg(PitchClass::C, 5),
            ]
        );
    }

    #[test]
    fn test_build_wraps_octave_mid_pattern() {
        // A minor crosses C after the second degree
        let space = build_scale_space(PitchClass::A, ScaleMode::Minor, ScaleCategory::Diatonic, 3, 4);
        assert_eq!(
            space.degrees(),
            &[
                deg(PitchClass::A, 3),
                deg(PitchClass::B, 3),
                deg(PitchClass::C, 4),
                deg(PitchClass::D, 4),
            ]
        );
    }

    #[test]
    fn test_build_single_note_pattern_repeat() {
        let space = build_scale_space(PitchClass::C, ScaleMode::Minor, ScaleCategory::Pentatonic, 4, 11);
        assert_eq!(space.len(), 11);
        assert_eq!(space[5], deg(PitchClass::C, 5));
        assert_eq!(space[10], deg(PitchClass::C, 6));
        for pair in space.degrees().windows(2) {
            assert!(pair[0].absolute() < pair[1].absolute());
        }
    }

    #[test]
    fn test_build_empty() {
        let space = build_scale_space(PitchClass::C, ScaleMode::Major, ScaleCategory::Blues, 4, 0);
        assert!(space.is_empty());
    }

    #[test]
    fn test_from_degrees_sorts_and_dedups() {
        let space = ScaleSpace::from_degrees(vec![
            deg(PitchClass::C, 5),
            deg(PitchClass::E, 4),
            deg(PitchClass::C, 4),
            deg(PitchClass::E, 4),
        ]);
        assert_eq!(
            space.degrees(),
            &[deg(PitchClass::C, 4), deg(PitchClass::E, 4), deg(PitchClass::C, 5)]
        );
    }

    #[test]
    fn test_deserialized_space_is_ordered() {
        let yaml = "- pitch_class: G\n  octave: 4\n- pitch_class: C\n  octave: 4\n- pitch_class: G\n  octave: 4\n";
        let space: ScaleSpace = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(space.degrees(), &[deg(PitchClass::C, 4), deg(PitchClass::G, 4)]);

        let round_trip: ScaleSpace =
            serde_yaml::from_str(&serde_yaml::to_string(&space).unwrap()).unwrap();
        assert_eq!(round_trip, space);
    }

    #[test]
    fn test_frequency() {
        assert!((deg(PitchClass::A, 4).frequency() - 440.0).abs() < 1e-9);
        assert!((deg(PitchClass::A, 5).frequency() - 880.0).abs() < 1e-9);
        assert!((deg(PitchClass::C, 4).frequency() - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn test_display() {
        let space = build_scale_space(PitchClass::G, ScaleMode::Major, ScaleCategory::Pentatonic, 3, 3);
        assert_eq!(space.to_string(), "[G3 A3 B3]");
        assert_eq!(deg(PitchClass::Cs, -1).to_string(), "C#-1");
    }

    #[test]
    fn test_serde_pitch_class_names() {
        let degree: ScaleDegree = serde_yaml::from_str("pitch_class: \"Db\"\noctave: 3\n").unwrap();
        assert_eq!(degree, deg(PitchClass::Cs, 3));
        let yaml = serde_yaml::to_string(&PitchClass::Fs).unwrap();
        assert_eq!(yaml.trim().trim_matches(|c| c == '\'' || c == '"'), "F#");
    }
}
