//! Manager-side request records.
//!
//! One record per admitted command, attached to the target
//! [`RobotInfo`](crate::robot::RobotInfo) and kept for the manager's
//! lifetime as an audit trail. The record is the closed tagged variant
//! the tracking state machine dispatches on; adding a request kind means
//! touching the inference in [`robot`](crate::robot) as well.

use crate::messages::{CommandId, Location, ModeKind, NavigationPoint};

/// Payload of an admitted request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    /// Pause, resume or dock
    Mode {
        /// Requested mode change
        kind: ModeKind,
    },
    /// Follow a path of graph waypoints
    Navigation {
        /// Requested path, non-empty, all indices valid on the graph
        path: Vec<NavigationPoint>,
    },
    /// Pin the robot's estimate near a waypoint
    Relocalization {
        /// Corrected location in the manager frame
        location: Location,
        /// Waypoint the robot last visited
        last_visited_waypoint_index: usize,
    },
}

/// Lifecycle record of one admitted command.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    id: CommandId,
    issued_at_us: u64,
    acknowledged: bool,
    completed: bool,
    kind: RequestKind,
}

impl RequestRecord {
    /// Create a record for a freshly admitted command.
    pub fn new(id: CommandId, kind: RequestKind, issued_at_us: u64) -> Self {
        Self {
            id,
            issued_at_us,
            acknowledged: false,
            completed: false,
            kind,
        }
    }

    /// Command id allocated at admission.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Time the command was admitted, microseconds.
    pub fn issued_at_us(&self) -> u64 {
        self.issued_at_us
    }

    /// Whether any state report has referenced this command yet.
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Whether the robot has reported this command finished.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The admitted payload.
    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    pub(crate) fn acknowledge(&mut self) {
        self.acknowledged = true;
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }
}
