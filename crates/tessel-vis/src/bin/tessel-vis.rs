//! Tessel Mesh Driver
//!
//! Grow a mesh to a target size and print the renderer snapshot, or the full
//! event timeline, as JSON on stdout. Logs go to stderr.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tessel_vis::{
    Simulation, SimulationConfig, DEFAULT_PROGRESS_EVERY, DEFAULT_TARGET_VERTICES,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tessel-vis", version, about = "Grow a degree-bounded mesh and emit it as JSON")]
struct Args {
    /// Number of vertices to grow to
    #[arg(short = 'n', long, env = "TESSEL_TARGET_VERTICES", default_value_t = DEFAULT_TARGET_VERTICES)]
    target_vertices: usize,

    /// Seed graph as JSON (defaults to the bootstrap triangle)
    #[arg(short, long, env = "TESSEL_SEED_PATH")]
    seed: Option<PathBuf>,

    /// Fail if the grown mesh breaks a structural invariant
    #[arg(long, env = "TESSEL_AUDIT")]
    audit: bool,

    /// Log progress every N ticks (0 disables)
    #[arg(long, env = "TESSEL_PROGRESS_EVERY", default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: usize,

    /// Emit the event timeline instead of the final snapshot
    #[arg(long)]
    events: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

impl From<Args> for SimulationConfig {
    fn from(args: Args) -> Self {
        Self {
            target_vertices: args.target_vertices,
            seed_path: args.seed,
            audit: args.audit,
            progress_every: args.progress_every,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessel_vis=info,tessel_mesh=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let (emit_events, pretty) = (args.events, args.pretty);

    let mut sim = Simulation::new(args.into())?;
    sim.run_to_target()?;

    tracing::info!(
        frame = sim.frame(),
        vertices = sim.vertex_count(),
        events = sim.event_count(),
        "writing output"
    );

    let mut out = std::io::stdout().lock();
    match (emit_events, pretty) {
        (true, true) => serde_json::to_writer_pretty(&mut out, sim.events())?,
        (true, false) => serde_json::to_writer(&mut out, sim.events())?,
        (false, true) => serde_json::to_writer_pretty(&mut out, &sim.snapshot())?,
        (false, false) => serde_json::to_writer(&mut out, &sim.snapshot())?,
    }
    writeln!(out)?;

    Ok(())
}
