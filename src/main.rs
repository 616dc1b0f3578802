//! Headless runner: steps a school along the figure-eight goal path and logs
//! progress.
//!
//! Usage: `shoal [count] [ticks] [seed] [config.json]`
//!
//! Set `RUST_LOG=shoal=trace` to see per-tick statistics.

use shoal::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK_RATE: f32 = 60.0;
const REPORT_EVERY: u64 = 60;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let config = match args.next() {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };

    info!(count, ticks, seed, "starting headless run");

    let mut sim = Simulation::new(Vec3::ZERO, count, config, seed)?;
    let path = GoalPath::default();
    let mut time = Time::new();
    time.set_fixed_delta(Some(1.0 / TICK_RATE));

    let started = std::time::Instant::now();
    for _ in 0..ticks {
        let dt = time.update();
        sim.step(path.position_at(time.elapsed()), dt);

        if sim.tick() % REPORT_EVERY == 0 {
            let stats = sim.last_stats();
            info!(
                tick = stats.tick,
                neighbor_links = stats.neighbor_links,
                collisions = stats.collision_pairs,
                max_speed = stats.max_speed,
                "progress"
            );
        }
    }

    let wall = started.elapsed().as_secs_f32();
    let centroid = sim.positions().fold(Vec3::ZERO, |acc, p| acc + p) / sim.len() as f32;
    info!(
        ticks = sim.tick(),
        seconds = wall,
        ticks_per_sec = sim.tick() as f32 / wall.max(f32::EPSILON),
        centroid = %centroid,
        "run finished"
    );

    Ok(())
}
