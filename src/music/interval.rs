// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interval arithmetic and neighbor lookup within a scale space.

use crate::error::{Result, SoloError};

use super::scale::{ScaleDegree, ScaleSpace};

/// Signed semitone distance from `a` to `b` (positive when `b` is higher)
pub fn semitone_interval(a: ScaleDegree, b: ScaleDegree) -> i32 {
    (b.octave - a.octave) * 12 + (b.pitch_class.index() as i32 - a.pitch_class.index() as i32)
}

/// Index of `note` in the space, or of the closest entry if absent
///
/// Ties resolve to the lowest index.
pub fn position_in_scale(note: ScaleDegree, space: &ScaleSpace) -> Result<usize> {
    if let Some(index) = space.iter().position(|&d| d == note) {
        return Ok(index);
    }
    nearest_index(note.absolute(), space)
}

/// Closest space entry to an absolute pitch (semitones above C0)
pub fn nearest_in_scale(absolute: i32, space: &ScaleSpace) -> Result<ScaleDegree> {
    nearest_index(absolute, space).map(|i| space[i])
}

fn nearest_index(absolute: i32, space: &ScaleSpace) -> Result<usize> {
    let mut nearest: Option<(usize, i32)> = None;
    for (i, degree) in space.iter().enumerate() {
        let distance = (degree.absolute() - absolute).abs();
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((i, distance)),
        }
    }
    nearest.map(|(i, _)| i).ok_or(SoloError::EmptyScaleSpace)
}

/// Move `steps` scale positions from `base`, wrapping around the space
///
/// Wrapping uses floor division, and each full wrap shifts the result by
/// one octave in the direction of travel.
pub fn step_in_scale(base: ScaleDegree, steps: i32, space: &ScaleSpace) -> Result<ScaleDegree> {
    let position = position_in_scale(base, space)? as i32;
    let len = space.len() as i32;
    let target = position + steps;
    let index = target.rem_euclid(len) as usize;
    let wraps = target.div_euclid(len);
    Ok(space[index].shift_octaves(wraps))
}
