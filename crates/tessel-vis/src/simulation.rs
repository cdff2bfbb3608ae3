//! Mesh growth simulation with event recording.

use serde_json::{json, Value};
use tessel_mesh::{check_invariants, grow, Graph, GrowthKind, InvariantViolation, SeedData, Tick};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::events::{MeshEvent, MeshSnapshot};
use crate::{Error, Result};

/// Drives a mesh toward a target size and records what each tick did.
///
/// Payloads are arbitrary JSON values.
pub struct Simulation {
    config: SimulationConfig,
    graph: Graph<Value>,
    events: Vec<MeshEvent>,
    current_frame: u64,
}

impl Simulation {
    /// Create a simulation from the configured seed file, or the triangle.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let seed = match &config.seed_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let seed: SeedData<Value> = serde_json::from_str(&raw)?;
                info!(
                    path = %path.display(),
                    vertices = seed.vertices.len(),
                    edges = seed.edges.len(),
                    "loaded seed"
                );
                seed
            }
            None => SeedData::triangle(),
        };
        Self::from_seed(config, seed)
    }

    /// Create a simulation from seed data. The seed is recorded as frame 0.
    pub fn from_seed(config: SimulationConfig, seed: SeedData<Value>) -> Result<Self> {
        let graph = Graph::from_seed(seed)?;
        let mut sim = Self {
            config,
            graph,
            events: Vec::new(),
            current_frame: 0,
        };
        sim.record_seed();
        Ok(sim)
    }

    fn record_seed(&mut self) {
        let frame = self.current_frame;
        for vertex in self.graph.vertices() {
            self.events.push(MeshEvent::VertexAdded {
                vertex: vertex.id(),
                split_edge: None,
                has_payload: vertex.has_payload(),
                frame,
            });
        }
        for edge in self.graph.edges() {
            self.events.push(MeshEvent::EdgeOpened {
                edge: edge.id(),
                source: edge.source(),
                target: edge.target(),
                weight: edge.weight(),
                frame,
            });
            if edge.is_closed() {
                self.events.push(MeshEvent::EdgeClosed {
                    edge: edge.id(),
                    frame,
                });
            }
        }
    }

    /// Run one growth tick and replace the held graph with its result.
    pub fn tick(&mut self, payload: Option<Value>) -> Result<GrowthKind> {
        let tick = grow(&self.graph, payload)?;
        self.record_tick(self.current_frame + 1, &tick)?;
        self.current_frame += 1;

        debug!(
            frame = self.current_frame,
            vertices = tick.graph.vertex_count(),
            rotations = tick.rotations.len(),
            "tick"
        );

        let kind = tick.kind;
        self.graph = tick.graph;
        Ok(kind)
    }

    fn record_tick(&mut self, frame: u64, tick: &Tick<Value>) -> Result<()> {
        let mark = self.events.len();
        if let Err(err) = self.push_tick_events(frame, tick) {
            self.events.truncate(mark);
            return Err(err);
        }
        Ok(())
    }

    fn push_tick_events(&mut self, frame: u64, tick: &Tick<Value>) -> Result<()> {
        let graph = &tick.graph;

        match tick.kind {
            GrowthKind::Bootstrap { vertex } => {
                self.events.push(MeshEvent::PayloadAttached { vertex, frame });
                for &edge in &tick.new_edges {
                    self.events.push(MeshEvent::EdgeRevealed { edge, frame });
                }
                return Ok(());
            }
            GrowthKind::Split { split_edge, vertex } => {
                self.events.push(MeshEvent::VertexAdded {
                    vertex,
                    split_edge: Some(split_edge),
                    has_payload: graph.vertex(vertex)?.has_payload(),
                    frame,
                });
            }
        }

        for &id in &tick.new_edges {
            let edge = graph.edge(id)?;
            self.events.push(MeshEvent::EdgeOpened {
                edge: id,
                source: edge.source(),
                target: edge.target(),
                weight: edge.weight(),
                frame,
            });
        }
        for &edge in &tick.closed_edges {
            self.events.push(MeshEvent::EdgeClosed { edge, frame });
        }
        for &rotation in &tick.rotations {
            self.events.push(MeshEvent::Rotated { rotation, frame });
        }
        Ok(())
    }

    /// Tick until the target vertex count is reached and bootstrap is over.
    ///
    /// Every tick carries a `{"tick": n}` payload. Returns the number of
    /// ticks run. With `audit` set, a graph that fails `check_invariants`
    /// is reported as [`Error::AuditFailed`].
    pub fn run_to_target(&mut self) -> Result<usize> {
        let target = self.config.target_vertices;
        info!(target, vertices = self.graph.vertex_count(), "growing mesh");

        let mut ticks = 0usize;
        while self.graph.vertex_count() < target || self.graph.in_bootstrap() {
            let payload = json!({ "tick": self.current_frame + 1 });
            self.tick(Some(payload))?;
            ticks += 1;

            let every = self.config.progress_every;
            if every > 0 && ticks % every == 0 {
                info!(
                    ticks,
                    vertices = self.graph.vertex_count(),
                    open_edges = self.graph.open_edge_count(),
                    "progress"
                );
            }
        }

        info!(
            ticks,
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            events = self.events.len(),
            "growth complete"
        );

        if self.config.audit {
            let violations = self.audit();
            if !violations.is_empty() {
                for violation in &violations {
                    warn!(%violation, "invariant violated");
                }
                return Err(Error::AuditFailed {
                    count: violations.len(),
                });
            }
            info!("audit clean");
        }

        Ok(ticks)
    }

    /// Structural audit of the current graph.
    pub fn audit(&self) -> Vec<InvariantViolation> {
        check_invariants(&self.graph)
    }

    /// Get all recorded events.
    pub fn events(&self) -> &[MeshEvent] {
        &self.events
    }

    /// Get event count.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Get vertex count.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.current_frame
    }

    /// The current graph.
    pub fn graph(&self) -> &Graph<Value> {
        &self.graph
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get current snapshot.
    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot::from_graph(self.current_frame, &self.graph)
    }
}
