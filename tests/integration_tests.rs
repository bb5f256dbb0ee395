// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for SOLO
//!
//! These tests drive the public API end to end: scale spaces feed the
//! phrase generator, phrases feed the assembler, and session files
//! configure the whole pipeline.

use rand::rngs::StdRng;
use rand::SeedableRng;

use solo::config::{GeneratorTuning, SessionFile};
use solo::music::{
    build_scale_space, semitone_interval, step_in_scale, PitchClass, ScaleCategory, ScaleDegree,
    ScaleMode, ScaleSpace,
};
use solo::solo::{
    generate_phrase, generate_solo, Duration, History, SoloEvent, SoloGenerator, SoloQueue,
    TICKS_PER_BEAT,
};
use solo::SoloError;

fn all_spaces() -> Vec<ScaleSpace> {
    let mut spaces = Vec::new();
    for mode in ScaleMode::ALL {
        for category in ScaleCategory::ALL {
            spaces.push(build_scale_space(PitchClass::A, mode, category, 3, 12));
        }
    }
    spaces
}

/// Every note of every solo stays inside the space it was generated over
#[test]
fn test_scale_containment_all_scales() {
    let mut rng = StdRng::seed_from_u64(2026);
    for space in all_spaces() {
        for _ in 0..50 {
            let events = generate_solo(&space, 4, &mut rng).unwrap();
            for event in &events {
                if let Some(pitch) = event.pitch() {
                    assert!(space.contains(&pitch), "{} outside {}", pitch, space);
                }
            }
        }
    }
}

/// A note never carries a rest duration and a rest never carries a pitch
#[test]
fn test_rest_duration_consistency() {
    let mut rng = StdRng::seed_from_u64(11);
    let space = build_scale_space(PitchClass::E, ScaleMode::Minor, ScaleCategory::Blues, 3, 9);
    for _ in 0..200 {
        for event in generate_solo(&space, 2, &mut rng).unwrap() {
            assert_eq!(event.pitch().is_none(), event.duration().is_rest());
            assert_eq!(event.is_rest(), event.duration().is_rest());
        }
    }
}

/// Repetition rests are extra; the note count always equals the length
#[test]
fn test_phrase_note_count() {
    let mut rng = StdRng::seed_from_u64(4);
    let space = build_scale_space(PitchClass::G, ScaleMode::Major, ScaleCategory::Pentatonic, 3, 6);
    let history = History::default();
    for length in 1..=6 {
        for _ in 0..100 {
            let phrase = generate_phrase(&space, &history, length, false, &mut rng).unwrap();
            let notes = phrase.iter().filter(|e| !e.is_rest()).count();
            assert_eq!(notes, length);
            assert!(!phrase.last().map(SoloEvent::is_rest).unwrap_or(true));
        }
    }
}

/// Each measure's own events cover at least four beats
#[test]
fn test_measure_fill() {
    let space = build_scale_space(PitchClass::C, ScaleMode::Major, ScaleCategory::Diatonic, 4, 8);
    let mut generator = SoloGenerator::new(StdRng::seed_from_u64(21));
    for _ in 0..200 {
        let measures = generator.generate_measures(&space, 3).unwrap();
        for measure in &measures {
            assert!(measure.ticks() >= 4 * TICKS_PER_BEAT);
            assert!(measure.beats() >= 4.0);
        }
    }
}

/// Consecutive sounded notes rarely share a pitch
#[test]
fn test_bounded_repetition() {
    let mut rng = StdRng::seed_from_u64(1234);
    let space = build_scale_space(PitchClass::D, ScaleMode::Minor, ScaleCategory::Diatonic, 4, 8);
    let history = History::default();

    let mut pairs = 0usize;
    let mut repeats = 0usize;
    for _ in 0..2000 {
        let phrase = generate_phrase(&space, &history, 3, false, &mut rng).unwrap();
        for window in phrase.windows(2) {
            if let (Some(a), Some(b)) = (window[0].pitch(), window[1].pitch()) {
                pairs += 1;
                if a == b {
                    repeats += 1;
                }
            }
        }
    }

    assert!(pairs > 1000);
    let rate = repeats as f64 / pairs as f64;
    assert!(rate < 0.15, "repetition rate too high: {:.3}", rate);
}

#[test]
fn test_seeded_solo_is_deterministic() {
    let space = build_scale_space(PitchClass::Fs, ScaleMode::Minor, ScaleCategory::Pentatonic, 3, 10);
    let first = generate_solo(&space, 8, StdRng::seed_from_u64(77)).unwrap();
    let second = generate_solo(&space, 8, StdRng::seed_from_u64(77)).unwrap();
    assert_eq!(first, second);

    let other = generate_solo(&space, 8, StdRng::seed_from_u64(78)).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_c_major_space() {
    let space = build_scale_space(PitchClass::C, ScaleMode::Major, ScaleCategory::Diatonic, 4, 8);
    let expected = vec![
        ScaleDegree::new(PitchClass::C, 4),
        ScaleDegree::new(PitchClass::D, 4),
        ScaleDegree::new(PitchClass::E, 4),
        ScaleDegree::new(PitchClass::F, 4),
        ScaleDegree::new(PitchClass::G, 4),
        ScaleDegree::new(PitchClass::A, 4),
        ScaleDegree::new(PitchClass::B, 4),
        ScaleDegree::new(PitchClass::C, 5),
    ];
    assert_eq!(space.degrees(), expected.as_slice());
}

#[test]
fn test_semitone_intervals() {
    let c4 = ScaleDegree::new(PitchClass::C, 4);
    let g4 = ScaleDegree::new(PitchClass::G, 4);
    let c5 = ScaleDegree::new(PitchClass::C, 5);
    assert_eq!(semitone_interval(c4, g4), 7);
    assert_eq!(semitone_interval(g4, c4), -7);
    assert_eq!(semitone_interval(c4, c5), 12);
}

#[test]
fn test_step_wraps_into_next_octave() {
    let space = build_scale_space(PitchClass::C, ScaleMode::Major, ScaleCategory::Diatonic, 4, 7);
    let b4 = ScaleDegree::new(PitchClass::B, 4);
    assert_eq!(
        step_in_scale(b4, 1, &space).unwrap(),
        ScaleDegree::new(PitchClass::C, 5)
    );
}

#[test]
fn test_empty_space_fails_fast() {
    let space = build_scale_space(PitchClass::C, ScaleMode::Major, ScaleCategory::Blues, 4, 0);
    assert!(space.is_empty());
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        generate_solo(&space, 2, &mut rng),
        Err(SoloError::EmptyScaleSpace)
    );
    assert_eq!(
        generate_phrase(&space, &History::default(), 3, true, &mut rng),
        Err(SoloError::EmptyScaleSpace)
    );
}

/// Triplets arrive as three consecutive notes with nothing in between
#[test]
fn test_triplets_complete_their_group() {
    let tuning = GeneratorTuning {
        min_phrase_len: 6,
        max_phrase_len: 8,
        ..Default::default()
    };
    let space = build_scale_space(PitchClass::As, ScaleMode::Major, ScaleCategory::Diatonic, 3, 15);
    let mut generator = SoloGenerator::with_tuning(tuning, StdRng::seed_from_u64(9)).unwrap();
    for _ in 0..100 {
        let events = generator.generate_solo(&space, 2).unwrap();
        let mut run = 0;
        for event in &events {
            if event.duration() == Duration::EighthTriplet {
                run += 1;
            } else {
                assert_eq!(run % 3, 0, "broken triplet group in {:?}", events);
                run = 0;
            }
        }
    }
}

#[test]
fn test_session_file_yaml_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.yaml");
    std::fs::write(
        &path,
        "scale:\n  root: Eb\n  mode: minor\n  category: blues\n  note_count: 10\nsolo:\n  measures: 3\n  seed: 5\n",
    )
    .unwrap();

    let session = SessionFile::load(&path).unwrap();
    let space = session.scale.build_space();
    assert_eq!(space.len(), 10);
    assert!(!space.contains_pitch_class(PitchClass::E));
    assert!(space.contains_pitch_class(PitchClass::A));

    let seed = session.solo.seed.unwrap();
    let mut generator =
        SoloGenerator::with_tuning(session.tuning.clone(), StdRng::seed_from_u64(seed)).unwrap();
    let measures = generator.generate_measures(&space, session.solo.measures).unwrap();
    assert_eq!(measures.len(), 3);
}

#[test]
fn test_session_file_toml_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("session.toml");
    std::fs::write(
        &toml_path,
        "[scale]\nroot = \"D\"\ncategory = \"pentatonic\"\n\n[tuning]\nstepwise = 0.5\n",
    )
    .unwrap();

    let session = SessionFile::load(&toml_path).unwrap();
    assert_eq!(session.scale.root, PitchClass::D);
    assert_eq!(session.tuning.stepwise, 0.5);

    let yaml_path = dir.path().join("saved.yaml");
    session.save(&yaml_path).unwrap();
    assert_eq!(SessionFile::load(&yaml_path).unwrap(), session);
}

#[test]
fn test_invalid_session_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "tuning:\n  min_phrase_len: 5\n  max_phrase_len: 2\n").unwrap();
    assert!(SessionFile::load(&path).is_err());
    assert!(SessionFile::load(dir.path().join("missing.yaml")).is_err());
}

/// The autoplay feed keeps producing in-scale events across refills
#[test]
fn test_autoplay_queue_feed() {
    let space = build_scale_space(PitchClass::A, ScaleMode::Minor, ScaleCategory::Pentatonic, 3, 11);
    let generator = SoloGenerator::new(StdRng::seed_from_u64(31));
    let mut queue = SoloQueue::new(generator, space.clone()).unwrap();

    let mut ticks = 0u32;
    for _ in 0..500 {
        let event = queue.next_event().unwrap();
        if let Some(pitch) = event.pitch() {
            assert!(space.contains(&pitch));
        }
        ticks += event.ticks();
    }
    assert!(ticks > 0);
}
