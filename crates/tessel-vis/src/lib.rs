//! Tessel Mesh Driver
//!
//! Grows a [`tessel_mesh`] graph to a target size and records a timeline of
//! what each tick did.
//!
//! # Architecture
//!
//! - **Simulation**: Runs growth ticks and records mesh events
//! - **Events**: Timeline entries stamped with the tick that produced them
//! - **Snapshot**: Renderer view of the mesh, rebuildable from any timeline prefix
//!
//! # Usage
//!
//! ```
//! use tessel_vis::{MeshSnapshot, Simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     target_vertices: 50,
//!     ..SimulationConfig::default()
//! };
//! let mut sim = Simulation::new(config)?;
//! sim.run_to_target()?;
//!
//! let replayed = MeshSnapshot::from_events(sim.events(), sim.event_count());
//! assert_eq!(replayed, sim.snapshot());
//! # Ok::<(), tessel_vis::Error>(())
//! ```

mod config;
mod error;
mod events;
mod simulation;

pub use config::{SimulationConfig, DEFAULT_PROGRESS_EVERY, DEFAULT_TARGET_VERTICES};
pub use error::{Error, Result};
pub use events::{MeshEvent, MeshSnapshot};
pub use simulation::Simulation;
