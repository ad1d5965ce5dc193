//! Static navigation graph shared by the whole fleet.
//!
//! The graph is a set of named waypoints and directed lanes connecting
//! them. It is built once (in code or from YAML) and never mutated while
//! the manager runs; share it between components with `Arc<NavGraph>`.
//!
//! ## Example YAML
//!
//! ```yaml
//! waypoints:
//!   - { map_name: "L1", position: { x: 0.0, y: 0.0 } }
//!   - { map_name: "L1", position: { x: 10.0, y: 0.0 } }
//! lanes:
//!   - { entry: 0, exit: 1 }
//!   - { entry: 1, exit: 0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};
use crate::messages::Point2D;

/// A node of the navigation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Name of the map this waypoint belongs to
    pub map_name: String,
    /// Planar location in graph units
    pub position: Point2D,
}

/// A directed edge of the navigation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Index of the waypoint this lane starts from
    pub entry: usize,
    /// Index of the waypoint this lane ends at
    pub exit: usize,
}

/// Directed navigation graph of waypoints and lanes.
///
/// Waypoint and lane indices are assigned in insertion order and are
/// stable for the lifetime of the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavGraph {
    waypoints: Vec<Waypoint>,
    lanes: Vec<Lane>,
}

impl NavGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waypoint, returning its index.
    pub fn add_waypoint(&mut self, map_name: impl Into<String>, position: Point2D) -> usize {
        self.waypoints.push(Waypoint {
            map_name: map_name.into(),
            position,
        });
        self.waypoints.len() - 1
    }

    /// Add a directed lane between two existing waypoints, returning its
    /// index.
    pub fn add_lane(&mut self, entry: usize, exit: usize) -> Result<usize> {
        if entry >= self.waypoints.len() || exit >= self.waypoints.len() {
            return Err(FleetError::Graph(format!(
                "lane [{} -> {}] references a waypoint outside the graph ({} waypoints)",
                entry,
                exit,
                self.waypoints.len()
            )));
        }
        self.lanes.push(Lane { entry, exit });
        Ok(self.lanes.len() - 1)
    }

    /// Number of waypoints in the graph.
    pub fn num_waypoints(&self) -> usize {
        self.waypoints.len()
    }

    /// Number of lanes in the graph.
    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    /// Waypoint at `index`, if it exists.
    pub fn waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// Lane at `index`, if it exists.
    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// All waypoints in index order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// All lanes in index order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Load a graph from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse a graph from a YAML string and validate lane indices.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let graph: Self =
            serde_yaml::from_str(yaml).map_err(|e| FleetError::Graph(e.to_string()))?;
        for (i, lane) in graph.lanes.iter().enumerate() {
            if lane.entry >= graph.waypoints.len() || lane.exit >= graph.waypoints.len() {
                return Err(FleetError::Graph(format!(
                    "lane [{}] references a waypoint outside the graph",
                    i
                )));
            }
        }
        Ok(graph)
    }
}
