// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solo::config::SessionFile;
use solo::music::{scale_name, PitchClass, ScaleCategory, ScaleMode};
use solo::solo::{SoloGenerator, SoloQueue};

fn print_usage() {
    println!("SOLO - Scale-constrained melodic solo generator");
    println!();
    println!("Usage: solo [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --root <NOTE>       Root pitch class, e.g. C, F#, Bb (default C)");
    println!("  --mode <MODE>       major | minor (default major)");
    println!("  --category <CAT>    diatonic | pentatonic | blues (default diatonic)");
    println!("  --octave <N>        Octave of the first scale degree (default 4)");
    println!("  --count <N>         Number of scale degrees to span (default 8)");
    println!("  --measures <N>      Measures to generate (default 2)");
    println!("  --seed <N>          Seed for reproducible output");
    println!("  --config <FILE>     Load a YAML or TOML session file");
    println!("  --stream <N>        Pull N events from an endless autoplay feed");
    println!("  --list-scales       List every root/mode/category combination");
    println!("  --help              Show this help message");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=debug) for generator logging on stderr.");
}

fn print_scales() {
    for mode in ScaleMode::ALL {
        for category in ScaleCategory::ALL {
            println!(
                "{:<12} {:<12} {} degrees per octave",
                mode.name(),
                category.name(),
                category.degree_count(mode)
            );
        }
    }
    println!();
    let roots: Vec<&str> = PitchClass::ALL.iter().map(|pc| pc.name()).collect();
    println!("Roots: {}", roots.join(" "));
}

/// Value following `flag`, parsed as `T`
fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(position) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let raw = args
        .get(position + 1)
        .ok_or_else(|| anyhow!("{} requires a value", flag))?;
    raw.parse::<T>()
        .map(Some)
        .map_err(|e| anyhow!("Invalid value for {}: {} ({})", flag, raw, e))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Session from `--config` (or defaults) with command-line overrides applied
fn build_session(args: &[String]) -> Result<SessionFile> {
    let mut session = match parse_flag::<String>(args, "--config")? {
        Some(path) => SessionFile::load(&path)
            .with_context(|| format!("Failed to load session from {}", path))?,
        None => SessionFile::default(),
    };

    if let Some(root) = parse_flag(args, "--root")? {
        session.scale.root = root;
    }
    if let Some(mode) = parse_flag(args, "--mode")? {
        session.scale.mode = mode;
    }
    if let Some(category) = parse_flag(args, "--category")? {
        session.scale.category = category;
    }
    if let Some(octave) = parse_flag(args, "--octave")? {
        session.scale.start_octave = octave;
    }
    if let Some(count) = parse_flag(args, "--count")? {
        session.scale.note_count = count;
    }
    if let Some(measures) = parse_flag(args, "--measures")? {
        session.solo.measures = measures;
    }
    if let Some(seed) = parse_flag(args, "--seed")? {
        session.solo.seed = Some(seed);
    }

    session.validate()?;
    Ok(session)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    if args.iter().any(|a| a == "--list-scales") {
        print_scales();
        return Ok(());
    }

    init_logging();

    let session = build_session(&args)?;
    let scale = &session.scale;
    let space = scale.build_space();

    println!(
        "{} from octave {} ({} degrees)",
        scale_name(scale.root, scale.mode, scale.category),
        scale.start_octave,
        space.len()
    );
    println!("{}", space);
    println!();

    let rng = match session.solo.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let generator = SoloGenerator::with_tuning(session.tuning.clone(), rng)?;

    if let Some(count) = parse_flag::<usize>(&args, "--stream")? {
        let mut queue = SoloQueue::with_refill(
            generator,
            space,
            session.solo.refill_measures,
            session.solo.refill_threshold,
        )?;
        for step in 0..count {
            println!("{:>5}  {}", step, queue.next_event()?);
        }
        return Ok(());
    }

    let mut generator = generator;
    let measures = generator.generate_measures(&space, session.solo.measures)?;
    for measure in &measures {
        for event in &measure.events {
            println!("{:>3}  {}", measure.index, event);
        }
    }

    Ok(())
}
