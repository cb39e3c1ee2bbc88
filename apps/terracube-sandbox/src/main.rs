//! Terracube Sandbox Demo
//!
//! Runs a scripted, headless game session: the player walks forward over
//! procedurally generated terrain while chunks stream in and out, breaking
//! the block under the crosshair every couple of seconds and collecting
//! the drops.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p terracube-sandbox -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `--seed <N>`: World generation seed (default: 42)
//! - `--frames <N>`: Number of simulated frames (default: 600)
//! - `--render-distance <N>`: Chunk load radius (default: 3)
//! - `--save <PATH>`: Write the edit log to this path on exit
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use terracube_app::{GameSession, InputSnapshot, SessionConfig};
use terracube_world::store::StreamingConfig;

const DT: f32 = 1.0 / 60.0;

struct SandboxParams {
    seed: u32,
    frames: u32,
    render_distance: i32,
    save: Option<PathBuf>,
}

impl Default for SandboxParams {
    fn default() -> Self {
        Self {
            seed: 42,
            frames: 600,
            render_distance: 3,
            save: None,
        }
    }
}

impl SandboxParams {
    /// Parse parameters from command line arguments.
    fn from_args() -> Self {
        let mut params = Self::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    if i + 1 < args.len() {
                        if let Ok(v) = args[i + 1].parse() {
                            params.seed = v;
                            i += 1;
                        }
                    }
                }
                "--frames" => {
                    if i + 1 < args.len() {
                        if let Ok(v) = args[i + 1].parse() {
                            params.frames = v;
                            i += 1;
                        }
                    }
                }
                "--render-distance" => {
                    if i + 1 < args.len() {
                        if let Ok(v) = args[i + 1].parse() {
                            params.render_distance = v;
                            i += 1;
                        }
                    }
                }
                "--save" => {
                    if i + 1 < args.len() {
                        params.save = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        params
    }
}

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let params = SandboxParams::from_args();
    info!(
        seed = params.seed,
        frames = params.frames,
        render_distance = params.render_distance,
        "starting sandbox session"
    );

    let mut session = GameSession::new(SessionConfig {
        world_seed: params.seed,
        streaming: StreamingConfig {
            render_distance: params.render_distance,
        },
        ..SessionConfig::default()
    });

    for frame in 0..params.frames {
        let input = InputSnapshot {
            forward: true,
            jump: frame % 90 == 0,
            sprint_pressed: frame == 120,
            break_clicked: frame % 45 == 44 && session.target().is_some(),
            yaw: 0.0,
            pitch: -0.35,
            ..InputSnapshot::default()
        };
        session.frame(&input, DT);

        if frame % 60 == 0 {
            let position = session.player().position;
            info!(
                frame,
                x = position.x,
                y = position.y,
                z = position.z,
                chunks = session.store().len(),
                drops = session.drops().len(),
                items = session.inventory().total(),
                "tick"
            );
        }
    }

    info!(
        chunks = session.store().len(),
        edited_chunks = session.edits().chunk_count(),
        items = session.inventory().total(),
        "session finished"
    );

    if let Some(path) = params.save {
        session.save_edits(&path)?;
        info!(path = %path.display(), "edit log saved");
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        "Terracube Sandbox Demo

USAGE:
    cargo run -p terracube-sandbox -- [OPTIONS]

OPTIONS:
    --seed <N>              World generation seed (default: 42)
    --frames <N>            Number of simulated frames (default: 600)
    --render-distance <N>   Chunk load radius (default: 3)
    --save <PATH>           Write the edit log to this path on exit
    -h, --help              Print this help message

EXAMPLES:
    # Default ten-second walk
    cargo run -p terracube-sandbox

    # Longer run on a different world
    cargo run -p terracube-sandbox -- --seed 7 --frames 3600

    # Keep the edits
    cargo run -p terracube-sandbox -- --save edits.bin

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
