//! Outbound command messages.
//!
//! One wire shape per request kind, each carrying the target robot name
//! and the command id allocated at admission. Locations in outbound
//! payloads are already in the robot frame; the manager applies the
//! coordinate transform before handing the message to the transport.

use serde::{Deserialize, Serialize};

use crate::messages::{CommandId, Location};

/// Mode change requested of a robot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeKind {
    /// Suspend motion, keeping the current command
    Pause,
    /// Resume a previously paused command
    Resume,
    /// Dock at the named dock
    Dock(String),
}

/// Mode change command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRequest {
    /// Target robot
    pub robot_name: String,
    /// Command id allocated for this request
    pub command_id: CommandId,
    /// Requested mode change
    pub kind: ModeKind,
}

/// One stop on a requested navigation path, referencing a graph waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationPoint {
    /// Index of the waypoint to visit
    pub waypoint_index: usize,
    /// Heading to arrive with; `None` leaves the heading up to the robot
    pub yaw: Option<f64>,
    /// Time to hold on this waypoint before proceeding, microseconds
    pub wait_until_us: Option<u64>,
}

impl NavigationPoint {
    /// A navigation point with no heading or hold-time preference.
    pub fn new(waypoint_index: usize) -> Self {
        Self {
            waypoint_index,
            yaw: None,
            wait_until_us: None,
        }
    }
}

/// A navigation path entry resolved to a robot-frame location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathWaypoint {
    /// Index of the waypoint on the navigation graph
    pub waypoint_index: usize,
    /// Waypoint location in the robot frame
    pub location: Location,
    /// Time to hold on this waypoint before proceeding, microseconds
    pub wait_until_us: Option<u64>,
}

/// Navigation command carrying the full resolved path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// Target robot
    pub robot_name: String,
    /// Command id allocated for this request
    pub command_id: CommandId,
    /// Path to follow, in order
    pub path: Vec<PathWaypoint>,
}

/// Relocalization command pinning a robot's estimate near a waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocalizationRequest {
    /// Target robot
    pub robot_name: String,
    /// Command id allocated for this request
    pub command_id: CommandId,
    /// Corrected location in the robot frame
    pub location: Location,
    /// Waypoint the robot last visited, for resuming graph tracking
    pub last_visited_waypoint_index: usize,
}
