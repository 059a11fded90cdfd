//! Catapult headless runner
//!
//! Plays the built-in levels with the autopilot for a fixed number of frames,
//! logging lifecycle events, and optionally writes the last frame's draw list
//! as JSON.

use std::fs;
use std::process;

use anyhow::{Context, Result, bail};

use catapult::Tuning;
use catapult::platform::Ticker;
use catapult::renderer::{DrawList, draw_fps, draw_frame};
use catapult::sim::{Autopilot, GameEvent, GamePhase, GameState, tick};

const USAGE: &str = "catapult [--frames <n>] [--tuning <tuning.json>] [--dump <frame.json>]";
const DEFAULT_FRAMES: u64 = 3600;

/// Nominal frame length fed to the ticker (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

struct Options {
    frames: u64,
    tuning: Option<String>,
    dump: Option<String>,
}

fn parse_args() -> Result<Options> {
    let mut options = Options {
        frames: DEFAULT_FRAMES,
        tuning: None,
        dump: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" => {
                let value = args.next().context(USAGE)?;
                options.frames = value
                    .parse()
                    .with_context(|| format!("Invalid frame count {value:?}"))?;
            }
            "--tuning" => options.tuning = Some(args.next().context(USAGE)?),
            "--dump" => options.dump = Some(args.next().context(USAGE)?),
            "-h" | "--help" => bail!("Usage: {USAGE}"),
            other => bail!("Unknown argument {other:?}\n\nUsage: {USAGE}"),
        }
    }
    Ok(options)
}

fn run() -> Result<()> {
    let options = parse_args()?;
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!("Catapult (headless) starting, {} frames", options.frames);
    let mut state = GameState::new(tuning);
    let mut pilot = Autopilot::new();
    let mut ticker = Ticker::new();
    let mut list = DrawList::new();
    let mut stats = Stats::default();

    for frame in 0..options.frames {
        let dt = ticker.tick(frame as f64 * FRAME_MS);

        pilot.plan(&state);
        tick(&mut state, &pilot, dt);
        pilot.end_frame();

        for event in state.drain_events() {
            stats.record(event);
        }

        list.clear_commands();
        draw_frame(&state, &mut list);
        draw_fps(ticker.fps(), &mut list);
    }

    let level = match state.phase {
        GamePhase::Finished => "finished".to_string(),
        _ => state.level_index.to_string(),
    };
    println!(
        "frames: {}  level: {level}  jumps: {}  orbs: {}  deaths: {}  levels cleared: {}  wins: {}",
        state.time_ticks, stats.jumps, stats.orbs, stats.deaths, stats.levels_cleared, stats.wins
    );

    if let Some(path) = &options.dump {
        let json = serde_json::to_string_pretty(&list)?;
        fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
        eprintln!("Wrote {} draw commands -> {path}", list.len());
    }

    Ok(())
}

#[derive(Default)]
struct Stats {
    jumps: u32,
    orbs: u32,
    deaths: u32,
    levels_cleared: u32,
    wins: u32,
}

impl Stats {
    fn record(&mut self, event: GameEvent) {
        log::debug!("{event:?}");
        match event {
            GameEvent::JumpStarted { .. } => self.jumps += 1,
            GameEvent::OrbCollected { .. } => self.orbs += 1,
            GameEvent::PlayerDied => self.deaths += 1,
            GameEvent::LevelComplete { .. } => self.levels_cleared += 1,
            GameEvent::WinShown => self.wins += 1,
            _ => {}
        }
    }
}
