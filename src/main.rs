//! Kettle Climb headless runner
//!
//! Loads optional tuning, level, settings and records files, then lets a
//! seeded bot play the level with keyboard input until it wins or runs out
//! of ticks.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use kettle_climb::input::{InputEvent, InputMapper, Key};
use kettle_climb::records::RunRecord;
use kettle_climb::sim::{GameEvent, GameState, Level, TickInput, tick};
use kettle_climb::{ConfigError, RunRecords, Settings, Tuning, format_elapsed};

/// Milliseconds per simulation tick (60 Hz)
const TICK_MS: f64 = 1000.0 / 60.0;
/// Ticks without touching ground before the bot gives up and respawns
const AIRBORNE_LIMIT: u32 = 600;

#[derive(Parser, Debug)]
#[command(name = "kettle-climb")]
#[command(about = "Run the kettlebell climb with a seeded autoplay bot")]
struct Args {
    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Level file (JSON array of obstacles or { "obstacles": [...] })
    #[arg(long)]
    level: Option<PathBuf>,

    /// Control settings (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Best-runs file; a victory is merged into it
    #[arg(long)]
    records: Option<PathBuf>,

    /// Bot RNG seed
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Stop after this many ticks
    #[arg(long, default_value = "36000")]
    max_ticks: u64,
}

/// Keyboard-only autoplay
struct Bot {
    rng: Pcg32,
    /// Key being held and ticks left before letting go
    held: Option<(Key, u32)>,
    airborne_ticks: u32,
}

impl Bot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: None,
            airborne_ticks: 0,
        }
    }

    /// Device events for this tick
    fn think(&mut self, state: &GameState) -> Vec<InputEvent> {
        let player = &state.player;

        if let Some((key, left)) = self.held {
            if left == 0 || !player.on_ground {
                self.held = None;
                return vec![InputEvent::KeyUp(key)];
            }
            self.held = Some((key, left - 1));
            return Vec::new();
        }

        if !player.on_ground {
            self.airborne_ticks += 1;
            if self.airborne_ticks > AIRBORNE_LIMIT {
                self.airborne_ticks = 0;
                return vec![InputEvent::KeyDown(Key::Respawn)];
            }
            return Vec::new();
        }
        self.airborne_ticks = 0;

        // Knocked below the checkpoint: go back up
        if state.checkpoint.platform.is_some() && player.pos.y > state.checkpoint.pos.y + 1.0 {
            return vec![InputEvent::KeyDown(Key::Respawn)];
        }

        let key = self.aim(state);
        let max_hold = (state.tuning.max_charge / state.tuning.charge_rate).ceil() as u32;
        let hold = self.rng.random_range(max_hold / 4..=max_hold.max(1));
        self.held = Some((key, hold));
        vec![InputEvent::KeyDown(key)]
    }

    /// Head for the closest obstacle whose top is above the feet
    fn aim(&mut self, state: &GameState) -> Key {
        let player = &state.player;
        let feet = player.feet_y();
        let center = player.center_x();
        let target = state
            .level
            .obstacles()
            .iter()
            .filter(|o| o.y < feet - 1.0)
            .map(|o| o.x + o.width * 0.5)
            .min_by(|a, b| (a - center).abs().total_cmp(&(b - center).abs()));

        match target {
            Some(x) if (x - center).abs() > 1.0 => {
                if x < center {
                    Key::Left
                } else {
                    Key::Right
                }
            }
            _ => {
                if self.rng.random_bool(0.5) {
                    Key::Left
                } else {
                    Key::Right
                }
            }
        }
    }
}

/// Read a file, treating a missing path as absent
fn read_optional(path: Option<&Path>) -> Result<Option<String>, ConfigError> {
    let Some(path) = path else {
        return Ok(None);
    };
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("{} not found", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn unix_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Jumped { .. } | GameEvent::Landed { .. } | GameEvent::Impact { .. } => {
            log::debug!("{event:?}")
        }
        _ => log::info!("{event:?}"),
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Kettle Climb starting (seed {})", args.seed);

    let tuning = match read_optional(args.tuning.as_deref())? {
        Some(json) => Tuning::from_json(&json)?,
        None => Tuning::default(),
    };
    let level = match read_optional(args.level.as_deref())? {
        Some(json) => Level::from_json(&json)?,
        None => Level::junk_pile(tuning.world_width, tuning.world_height),
    };
    let settings = read_optional(args.settings.as_deref())?
        .map(|json| Settings::from_json_or_default(&json))
        .unwrap_or_default();

    let mut state = GameState::new(tuning, level, 0.0);
    let mut mapper = InputMapper::new(settings);
    let mut bot = Bot::new(args.seed);
    let mut now_ms = 0.0;

    for _ in 0..args.max_ticks {
        let events = bot.think(&state);
        let mut input = TickInput::at(now_ms);
        input.commands = mapper.map_all(events, &state);
        tick(&mut state, &input);

        for event in state.drain_events() {
            log_event(&event);
        }
        if state.is_victory() {
            break;
        }
        now_ms += TICK_MS;
    }

    let player = &state.player;
    let elapsed_ms = player.elapsed_ms(now_ms);
    println!(
        "{} after {} ticks: time {}, {} jumps, {} respawns",
        if state.is_victory() { "Victory" } else { "Gave up" },
        state.time_ticks,
        format_elapsed(elapsed_ms),
        player.jump_count,
        player.reset_count,
    );

    if let (true, Some(path)) = (state.is_victory(), args.records.as_deref()) {
        let mut records = read_optional(Some(path))?
            .map(|json| RunRecords::from_json_or_default(&json))
            .unwrap_or_default();
        let run = RunRecord {
            elapsed_ms,
            jumps: player.jump_count,
            respawns: player.reset_count,
            timestamp: unix_ms(),
        };
        match records.add_run(run) {
            Some(rank) => {
                println!("New record: #{rank}");
                std::fs::write(path, records.to_json()?)?;
            }
            None => log::info!("Run did not make the records"),
        }
    }

    Ok(())
}
