//! Inbound robot state reports.

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};
use crate::messages::{CommandId, Location, RobotMode};

/// Periodic self-report from one robot.
///
/// Construction validates the message eagerly; the transport layer must
/// discard reports that fail to construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    timestamp_us: u64,
    name: String,
    model: String,
    command_id: Option<CommandId>,
    command_completed: bool,
    mode: RobotMode,
    battery_percent: f64,
    location: Location,
    target_path_index: Option<usize>,
}

impl RobotState {
    /// Create a validated state report.
    ///
    /// # Errors
    /// Rejects an empty name, an empty model, and a battery level outside
    /// `[0, 1]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp_us: u64,
        name: impl Into<String>,
        model: impl Into<String>,
        command_id: Option<CommandId>,
        command_completed: bool,
        mode: RobotMode,
        battery_percent: f64,
        location: Location,
        target_path_index: Option<usize>,
    ) -> Result<Self> {
        let name = name.into();
        let model = model.into();
        if name.is_empty() {
            return Err(FleetError::InvalidMessage(
                "name in RobotState cannot be empty".into(),
            ));
        }
        if model.is_empty() {
            return Err(FleetError::InvalidMessage(
                "model in RobotState cannot be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&battery_percent) {
            return Err(FleetError::InvalidMessage(format!(
                "battery level in RobotState must be within [0, 1], got {}",
                battery_percent
            )));
        }
        Ok(Self {
            timestamp_us,
            name,
            model,
            command_id,
            command_completed,
            mode,
            battery_percent,
            location,
            target_path_index,
        })
    }

    /// Report timestamp in microseconds.
    pub fn timestamp_us(&self) -> u64 {
        self.timestamp_us
    }

    /// Name of the reporting robot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model of the reporting robot.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Command the robot is working on, if any.
    pub fn command_id(&self) -> Option<CommandId> {
        self.command_id
    }

    /// Whether the referenced command has been completed.
    pub fn command_completed(&self) -> bool {
        self.command_completed
    }

    /// Reported operating mode.
    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    /// Battery level within `[0, 1]`.
    pub fn battery_percent(&self) -> f64 {
        self.battery_percent
    }

    /// Reported location.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Index into the active navigation path the robot is heading for.
    pub fn target_path_index(&self) -> Option<usize> {
        self.target_path_index
    }

    /// Same report with the location replaced, for frame conversion.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Point2D;

    fn location() -> Location {
        Location::new("L1", Point2D::new(0.0, 0.0), 0.0)
    }

    #[test]
    fn test_valid_state() {
        let state = RobotState::new(
            0,
            "bot_1",
            "model_a",
            None,
            false,
            RobotMode::Idle,
            1.0,
            location(),
            None,
        );
        assert!(state.is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let state = RobotState::new(
            0,
            "",
            "model_a",
            None,
            false,
            RobotMode::Idle,
            1.0,
            location(),
            None,
        );
        assert!(state.is_err());
    }

    #[test]
    fn test_empty_model_rejected() {
        let state = RobotState::new(
            0,
            "bot_1",
            "",
            None,
            false,
            RobotMode::Idle,
            1.0,
            location(),
            None,
        );
        assert!(state.is_err());
    }

    #[test]
    fn test_battery_out_of_range_rejected() {
        for battery in [-0.1, 1.1] {
            let state = RobotState::new(
                0,
                "bot_1",
                "model_a",
                None,
                false,
                RobotMode::Idle,
                battery,
                location(),
                None,
            );
            assert!(state.is_err(), "battery {} should be rejected", battery);
        }
    }
}
