//! Headless match runner.
//!
//! - `duelist-host gen <idle|brawl|versus|short>` prints a replay (config + frame
//!   transcript) as JSON on stdout
//! - `duelist-host replay [FILE]` runs a replay from a file or stdin and
//!   prints the result with its transcript hash and final state digest
//!
//! Logging goes to stderr; set `RUST_LOG=debug` to see every hit.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use duelist_core::*;

#[derive(Parser)]
#[command(name = "duelist-host")]
#[command(about = "Generate and replay deterministic duel transcripts")]
#[command(version)]
struct Cli {
    /// Match config JSON overriding the default (or the replay's own) config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a scripted replay to stdout
    Gen {
        #[arg(value_enum, default_value_t = Scenario::Idle)]
        scenario: Scenario,
    },

    /// Run a replay and report the outcome
    Replay {
        /// Replay JSON file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Player one never touches the keyboard; the AI plays the whole match
    Idle,
    /// Player one walks in and cycles punches, kicks, jumps and fireballs
    Brawl,
    /// Two keyboard players (WASD and arrows) brawling each other
    Versus,
    /// 100 idle frames for quick checks
    Short,
}

impl Scenario {
    fn default_config(self) -> MatchConfig {
        match self {
            Scenario::Versus => versus_config(),
            _ => default_config(),
        }
    }
}

#[derive(Serialize)]
struct MatchSummary {
    frames: u64,
    rounds: u32,
    match_over: bool,
    winner: Option<FighterId>,
    scores: [u32; 2],
    hits: [u32; 2],
    rounds_won: [u32; 2],
    health: [i32; 2],
    transcript_hash: String,
    state_digest: String,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_replay(file: Option<&Path>) -> Result<ReplayInput> {
    match file {
        Some(path) => read_json(path),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read replay from stdin")?;
            serde_json::from_str(&buf).context("failed to parse replay JSON from stdin")
        }
    }
}

/// Step the simulation through every frame, stopping early once the match
/// is decided.
fn run_match(config: &MatchConfig, frames: &[FrameInput]) -> Result<MatchState> {
    let mut state = create_initial_state(config).context("invalid match config")?;
    for frame in frames {
        state = step(&state, frame, config);
        if state.is_match_over() {
            break;
        }
    }
    Ok(state)
}

fn frame(keys: &[KeyCode]) -> FrameInput {
    FrameInput {
        dt: 1.0 / TARGET_FPS as f64,
        keys: KeySnapshot::from_keys(keys),
    }
}

/// Enough frames for the longest possible match on this config: the shared
/// clock running out plus the pause after every decided round.
fn full_match_frames(config: &MatchConfig) -> usize {
    let pauses = (config.rounds_to_win * 2).saturating_sub(1) as f64 * ROUND_OVER_LINGER;
    ((config.round_duration + pauses) * TARGET_FPS as f64).ceil() as usize + 1
}

/// Keyboard player `i` of `config`, with the key that walks toward the other
/// fighter.
fn keyboard_player(config: &MatchConfig, i: usize) -> Result<(ControlBinding, Option<KeyCode>)> {
    let setup = &config.fighters[i];
    let Some(binding) = setup.binding.filter(|_| !setup.is_ai) else {
        bail!("scenario needs a keyboard-controlled player {}", i + 1);
    };
    let toward = if setup.spawn_x <= config.fighters[1 - i].spawn_x {
        binding.right
    } else {
        binding.left
    };
    Ok((binding, toward))
}

/// Walk in, then punch, kick, fireball and jump on a 48-frame cycle.
fn brawl_keys(binding: &ControlBinding, toward: Option<KeyCode>, t: usize) -> Vec<KeyCode> {
    let key = match t % 48 {
        0..=17 => toward,
        18 | 30 => binding.punch,
        24 => binding.kick,
        36 => binding.fireball,
        42 => binding.jump,
        _ => None,
    };
    key.into_iter().collect()
}

fn brawl(config: &MatchConfig) -> Result<Vec<FrameInput>> {
    let (binding, toward) = keyboard_player(config, 0)?;
    let frames = (0..full_match_frames(config))
        .map(|t| frame(&brawl_keys(&binding, toward, t)))
        .collect();
    Ok(frames)
}

/// Both players run the brawl cycle, half a cycle apart.
fn versus(config: &MatchConfig) -> Result<Vec<FrameInput>> {
    let (left, left_toward) = keyboard_player(config, 0)?;
    let (right, right_toward) = keyboard_player(config, 1)?;
    let frames = (0..full_match_frames(config))
        .map(|t| {
            let mut keys = brawl_keys(&left, left_toward, t);
            keys.extend(brawl_keys(&right, right_toward, t + 24));
            frame(&keys)
        })
        .collect();
    Ok(frames)
}

fn generate(scenario: Scenario, config: MatchConfig) -> Result<ReplayInput> {
    let frames = match scenario {
        Scenario::Idle => vec![frame(&[]); full_match_frames(&config)],
        Scenario::Brawl => brawl(&config)?,
        Scenario::Versus => versus(&config)?,
        Scenario::Short => vec![frame(&[]); 100],
    };

    // Verify by running the sim
    let state = run_match(&config, &frames)?;
    info!(
        ?scenario,
        frames = frames.len(),
        final_frame = state.frame,
        phase = ?state.phase,
        scores = ?[state.stats[0].score, state.stats[1].score],
        "generated replay"
    );

    Ok(ReplayInput { config, frames })
}

fn summarize(state: &MatchState, frames: &[FrameInput]) -> MatchSummary {
    let winner = match state.phase {
        Phase::MatchOver { winner } => winner,
        _ => None,
    };
    MatchSummary {
        frames: state.frame,
        rounds: state.round,
        match_over: state.is_match_over(),
        winner,
        scores: state.stats.map(|s| s.score),
        hits: state.stats.map(|s| s.hits),
        rounds_won: state.stats.map(|s| s.rounds_won),
        health: state.fighters.map(|f| f.health),
        transcript_hash: hex::encode(hash_transcript(frames)),
        state_digest: hex::encode(state_digest(state)),
    }
}

fn print_result(summary: &MatchSummary) {
    println!("=== Match Result ===");
    match (summary.match_over, summary.winner) {
        (true, Some(w)) => println!("Winner: P{w}"),
        (true, None) => println!("Winner: none (draw)"),
        (false, _) => println!("Winner: undecided (transcript ended mid-match)"),
    }
    println!(
        "Rounds: {} played, won P0={}, P1={}",
        summary.rounds, summary.rounds_won[0], summary.rounds_won[1]
    );
    println!("Scores: P0={}, P1={}", summary.scores[0], summary.scores[1]);
    println!("Hits: P0={}, P1={}", summary.hits[0], summary.hits[1]);
    println!("Health: P0={}, P1={}", summary.health[0], summary.health[1]);
    println!("Frames: {}", summary.frames);
    println!("Transcript hash: {}", summary.transcript_hash);
    println!("State digest: {}", summary.state_digest);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_override = cli
        .config
        .as_deref()
        .map(read_json::<MatchConfig>)
        .transpose()?;

    match cli.command {
        Commands::Gen { scenario } => {
            let config = config_override.unwrap_or_else(|| scenario.default_config());
            let replay = generate(scenario, config)?;
            println!(
                "{}",
                serde_json::to_string(&replay).context("failed to encode replay")?
            );
        }
        Commands::Replay { file, json } => {
            let replay = load_replay(file.as_deref())?;
            let config = config_override.unwrap_or(replay.config);
            info!(frames = replay.frames.len(), "replay loaded");

            let state = run_match(&config, &replay.frames)?;
            let summary = summarize(&state, &replay.frames);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&summary).context("failed to encode result")?
                );
            } else {
                print_result(&summary);
            }
        }
    }
    Ok(())
}
