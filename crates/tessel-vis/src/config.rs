//! Driver configuration.

use std::path::PathBuf;

use crate::{Error, Result};

/// Default number of vertices to grow to.
pub const DEFAULT_TARGET_VERTICES: usize = 256;

/// Default progress log interval, in ticks.
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// Configuration for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Stop once the graph has this many vertices.
    pub target_vertices: usize,
    /// Seed graph as JSON `SeedData`; the triangle when absent.
    pub seed_path: Option<PathBuf>,
    /// Run `check_invariants` after the run.
    pub audit: bool,
    /// Log progress every N ticks. Zero disables progress logs.
    pub progress_every: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_vertices: DEFAULT_TARGET_VERTICES,
            seed_path: None,
            audit: false,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl SimulationConfig {
    /// Create config from environment variables, falling back to defaults.
    ///
    /// Reads `TESSEL_TARGET_VERTICES`, `TESSEL_SEED_PATH`, `TESSEL_AUDIT` and
    /// `TESSEL_PROGRESS_EVERY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let target_vertices = match lookup("TESSEL_TARGET_VERTICES") {
            Some(raw) => parse_count("TESSEL_TARGET_VERTICES", &raw)?,
            None => defaults.target_vertices,
        };

        let seed_path = lookup("TESSEL_SEED_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let audit = match lookup("TESSEL_AUDIT") {
            Some(raw) => parse_flag("TESSEL_AUDIT", &raw)?,
            None => defaults.audit,
        };

        let progress_every = match lookup("TESSEL_PROGRESS_EVERY") {
            Some(raw) => parse_count("TESSEL_PROGRESS_EVERY", &raw)?,
            None => defaults.progress_every,
        };

        Ok(Self {
            target_vertices,
            seed_path,
            audit,
            progress_every,
        })
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{key}: expected a count, got {raw:?}")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidConfig(format!(
            "{key}: expected a boolean, got {raw:?}"
        ))),
    }
}
