//! Per-robot bookkeeping and the tracking state machine.
//!
//! A [`RobotInfo`] is created the first time a state report names an
//! unknown robot and lives for the manager's lifetime. Every subsequent
//! report runs one inference step that reconciles the reported position
//! with the navigation graph, taking the command currently in flight
//! into account: an active navigation request justifies motion that
//! would otherwise mean the robot has diverged.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::geometry::{is_near_waypoint, is_within_lane, nearest_waypoint};
use crate::graph::NavGraph;
use crate::messages::{CommandId, NavigationPoint, Point2D, RobotState};
use crate::requests::{RequestKind, RequestRecord};

/// Where on the navigation graph a robot is believed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// Within the nearness threshold of the waypoint
    OnWaypoint(usize),
    /// Longitudinally within the lane
    OnLane(usize),
    /// En route to the waypoint under an active command, off any lane
    TowardsWaypoint(usize),
    /// Cannot be reconciled with any waypoint or lane
    Lost,
}

/// Everything the manager knows about one robot.
pub struct RobotInfo {
    name: String,
    model: String,
    first_found_us: u64,
    last_updated_us: u64,
    state: RobotState,
    allocated: HashMap<CommandId, RequestRecord>,
    tracking: TrackingState,
    graph: Arc<NavGraph>,
    nearness: f64,
}

impl RobotInfo {
    /// Register a robot from its first state report.
    ///
    /// The report has already been mapped into the manager frame. The
    /// robot starts [`Lost`](TrackingState::Lost) and is classified once
    /// immediately, so a robot that boots on a waypoint is already
    /// `OnWaypoint` after registration. Normally driven by the
    /// [`Manager`](crate::manager::Manager).
    pub fn new(state: RobotState, graph: Arc<NavGraph>, nearness: f64, now_us: u64) -> Self {
        let mut info = Self {
            name: state.name().to_string(),
            model: state.model().to_string(),
            first_found_us: now_us,
            last_updated_us: now_us,
            state,
            allocated: HashMap::new(),
            tracking: TrackingState::Lost,
            graph,
            nearness,
        };
        info.tracking = info.track_through_graph(info.state.location().position);
        info
    }

    /// Name of the robot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model of the robot.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Time the robot was first seen, microseconds.
    pub fn first_found_us(&self) -> u64 {
        self.first_found_us
    }

    /// Time of the last applied state report, microseconds.
    pub fn last_updated_us(&self) -> u64 {
        self.last_updated_us
    }

    /// Last applied state report, in the manager frame.
    pub fn state(&self) -> &RobotState {
        &self.state
    }

    /// Current tracking estimate.
    pub fn tracking(&self) -> TrackingState {
        self.tracking
    }

    /// Record of the command with this id, if it was allocated to this
    /// robot.
    pub fn request(&self, id: CommandId) -> Option<&RequestRecord> {
        self.allocated.get(&id)
    }

    /// All records ever allocated to this robot, in no particular order.
    pub fn allocated_requests(&self) -> impl Iterator<Item = &RequestRecord> {
        self.allocated.values()
    }

    /// Attach the record of a freshly admitted command.
    ///
    /// A record reusing an already-allocated id is dropped with a
    /// warning.
    pub fn allocate_request(&mut self, record: RequestRecord) {
        match self.allocated.entry(record.id()) {
            Entry::Occupied(_) => {
                log::warn!(
                    "Attempted to allocate a request with existing command ID [{}] on robot [{}], ignoring",
                    record.id(),
                    self.name
                );
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    /// Apply one state report.
    ///
    /// Refused silently if the report names a different robot. Updates
    /// the tracking estimate, the stored state and `last_updated`, and
    /// marks acknowledgement/completion on the referenced request
    /// record. Normally driven by the [`Manager`](crate::manager::Manager).
    pub fn update_state(&mut self, new_state: RobotState, now_us: u64) {
        if new_state.name() != self.name {
            return;
        }

        let new_tracking = self.infer_tracking(&new_state);

        if let Some(id) = new_state.command_id() {
            if let Some(record) = self.allocated.get_mut(&id) {
                record.acknowledge();
                if new_state.command_completed() {
                    record.complete();
                }
                // A navigation command is also done once the robot is
                // observed on the final waypoint of its path.
                let navigation_goal = match record.kind() {
                    RequestKind::Navigation { path } => {
                        path.last().map(|point| point.waypoint_index)
                    }
                    _ => None,
                };
                if let TrackingState::OnWaypoint(w) = new_tracking {
                    if navigation_goal == Some(w) {
                        record.complete();
                    }
                }
            }
        }

        self.tracking = new_tracking;
        self.state = new_state;
        self.last_updated_us = now_us;
    }

    /// One inference step over the incoming report.
    fn infer_tracking(&self, state: &RobotState) -> TrackingState {
        let position = state.location().position;
        let command_id = match state.command_id() {
            Some(id) => id,
            None => return self.track_through_graph(position),
        };
        match self.allocated.get(&command_id) {
            Some(record) => match record.kind() {
                // Mode changes do not move a robot between nodes; any
                // observed motion is still divergence.
                RequestKind::Mode { .. } => self.track_through_graph(position),
                RequestKind::Relocalization {
                    last_visited_waypoint_index,
                    ..
                } => self.track_with_relocalization(*last_visited_waypoint_index, position),
                RequestKind::Navigation { path } => self.track_with_navigation(path, state),
            },
            None => {
                log::warn!(
                    "Robot [{}] reported command ID [{}] that was not allocated through this manager, tracking it as command-free",
                    self.name,
                    command_id
                );
                self.track_through_graph(position)
            }
        }
    }

    /// Command-free inference: without a command to justify motion,
    /// leaving the current hypothesis means the robot is lost.
    fn track_through_graph(&self, position: Point2D) -> TrackingState {
        match self.tracking {
            TrackingState::OnWaypoint(w) => {
                if is_near_waypoint(&self.graph, w, position, self.nearness) {
                    TrackingState::OnWaypoint(w)
                } else {
                    self.declare_lost()
                }
            }
            TrackingState::OnLane(l) => {
                let exit = self.graph.lane(l).map(|lane| lane.exit);
                if let Some(exit) = exit {
                    if is_near_waypoint(&self.graph, exit, position, self.nearness) {
                        return TrackingState::OnWaypoint(exit);
                    }
                }
                if is_within_lane(&self.graph, l, position) {
                    return TrackingState::OnLane(l);
                }
                match nearest_waypoint(&self.graph, position) {
                    Some((w, dist)) if dist < self.nearness => TrackingState::OnWaypoint(w),
                    _ => self.declare_lost(),
                }
            }
            TrackingState::TowardsWaypoint(t) => {
                if is_near_waypoint(&self.graph, t, position, self.nearness) {
                    TrackingState::OnWaypoint(t)
                } else {
                    TrackingState::TowardsWaypoint(t)
                }
            }
            TrackingState::Lost => match nearest_waypoint(&self.graph, position) {
                Some((w, dist)) if dist < self.nearness => TrackingState::OnWaypoint(w),
                _ => TrackingState::Lost,
            },
        }
    }

    /// Relocalization narrows the hypothesis to the declared
    /// last-visited waypoint; away from it, fall back to command-free
    /// inference.
    fn track_with_relocalization(&self, last_visited: usize, position: Point2D) -> TrackingState {
        if is_near_waypoint(&self.graph, last_visited, position, self.nearness) {
            TrackingState::OnWaypoint(last_visited)
        } else {
            self.track_through_graph(position)
        }
    }

    /// Navigation inference against the target waypoint the robot says
    /// it is heading for. Off-lane is `TowardsWaypoint`, not lost; the
    /// command justifies the motion.
    fn track_with_navigation(&self, path: &[NavigationPoint], state: &RobotState) -> TrackingState {
        let position = state.location().position;
        let target = state
            .target_path_index()
            .and_then(|index| path.get(index))
            .map(|point| point.waypoint_index);
        let target = match target {
            Some(t) => t,
            // No usable target on the path; degrade to command-free.
            None => return self.track_through_graph(position),
        };

        if is_near_waypoint(&self.graph, target, position, self.nearness) {
            return TrackingState::OnWaypoint(target);
        }
        for (index, lane) in self.graph.lanes().iter().enumerate() {
            if lane.exit == target && is_within_lane(&self.graph, index, position) {
                return TrackingState::OnLane(index);
            }
        }
        TrackingState::TowardsWaypoint(target)
    }

    fn declare_lost(&self) -> TrackingState {
        if self.tracking != TrackingState::Lost {
            log::warn!(
                "Robot [{}] has diverged from the navigation graph and is LOST",
                self.name
            );
        }
        TrackingState::Lost
    }
}
