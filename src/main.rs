//! Headless runner: steps a particle effect and logs what a renderer would see.
//!
//! ```text
//! spark-pool [config.json] [frames]
//! RUST_LOG=debug spark-pool sparks.json 600
//! ```

use spark_pool::prelude::*;
use std::process::ExitCode;

const FRAME_MS: f32 = 1000.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ParticleConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load config from {path}: {e}. Using default configuration.");
            ParticleConfig::default()
        }),
        None => {
            log::info!("No config file specified, using defaults.");
            ParticleConfig::default()
        }
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut sim = match ParticleSimulator::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut clock = FrameClock::fixed(FRAME_MS);
    let mut uploads = [0u64; 3];
    let mut peak = 0;

    for _ in 0..frames {
        sim.advance(clock.tick());

        let dirty = sim.take_dirty();
        for (count, flag) in uploads.iter_mut().zip([
            DirtyBuffers::POSITIONS,
            DirtyBuffers::COLORS,
            DirtyBuffers::SIZES,
        ]) {
            if dirty.contains(flag) {
                *count += 1;
            }
        }

        peak = peak.max(sim.alive_count());
        if clock.frame() % 60 == 0 {
            log::debug!(
                "t={:.0} ms dt={:.2} ms alive={}/{}",
                clock.elapsed_ms(),
                clock.delta_ms(),
                sim.alive_count(),
                sim.pool().capacity()
            );
        }
    }

    log::info!(
        "{} frames simulated: {} alive, peak {}, uploads positions={} colors={} sizes={}",
        clock.frame(),
        sim.alive_count(),
        peak,
        uploads[0],
        uploads[1],
        uploads[2]
    );
    ExitCode::SUCCESS
}
