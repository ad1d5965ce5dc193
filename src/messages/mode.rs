//! Robot operating modes.

use serde::{Deserialize, Serialize};

/// Operating mode reported by a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotMode {
    /// Stationary with no command in progress
    Idle,
    /// Executing a navigation command
    Moving,
    /// Motion suspended by a pause command
    Paused,
    /// Connected to a charger
    Charging,
    /// Executing a docking maneuver
    Docking,
    /// Emergency stop engaged
    Emergency,
    /// Unrecoverable fault reported by the robot
    Error,
}

impl RobotMode {
    /// Whether the robot can accept motion commands in this mode.
    pub fn is_operational(&self) -> bool {
        !matches!(self, RobotMode::Emergency | RobotMode::Error)
    }
}
