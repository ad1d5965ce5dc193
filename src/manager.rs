//! Fleet manager coordinator.
//!
//! Owns the robot registry, allocates command ids, runs the admission
//! checks for outbound requests and dispatches inbound state reports.
//! The manager is single-threaded and cooperative: all mutation happens
//! on the thread calling [`Manager::run_once`] or a request method, and
//! the cadence of `run_once` is the caller's responsibility.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::FleetConfig;
use crate::error::Result;
use crate::graph::NavGraph;
use crate::messages::{
    CommandId, Location, ModeKind, ModeRequest, NavigationPoint, NavigationRequest, PathWaypoint,
    RelocalizationRequest, RobotState,
};
use crate::requests::{RequestKind, RequestRecord};
use crate::robot::RobotInfo;
use crate::transform::CoordinateTransformer;
use crate::transport::FleetTransport;

/// Source of the current time, microseconds.
pub type TimeNowFn = Box<dyn Fn() -> u64 + Send>;

/// Invoked with a read-only view of a robot after each applied state
/// report. The borrow is only valid for the duration of the call.
pub type RobotUpdatedCallback = Box<dyn FnMut(&RobotInfo) + Send>;

/// Central coordinator for one fleet.
pub struct Manager {
    config: FleetConfig,
    graph: Arc<NavGraph>,
    transport: Box<dyn FleetTransport>,
    to_robot_transform: Arc<CoordinateTransformer>,
    time_now_fn: TimeNowFn,
    robot_updated_callback: Option<RobotUpdatedCallback>,
    robots: HashMap<String, RobotInfo>,
    current_command_id: CommandId,
}

impl Manager {
    /// Create a manager.
    ///
    /// # Errors
    /// Fails when the configuration does not validate (empty fleet name,
    /// non-positive thresholds).
    pub fn new(
        config: FleetConfig,
        graph: Arc<NavGraph>,
        transport: Box<dyn FleetTransport>,
        to_robot_transform: Arc<CoordinateTransformer>,
        time_now_fn: TimeNowFn,
        robot_updated_callback: Option<RobotUpdatedCallback>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            graph,
            transport,
            to_robot_transform,
            time_now_fn,
            robot_updated_callback,
            robots: HashMap::new(),
            current_command_id: 0,
        })
    }

    /// Name of the fleet this manager coordinates.
    pub fn fleet_name(&self) -> &str {
        &self.config.fleet_name
    }

    /// One manager tick: drain every state report currently available
    /// from the transport and apply them in delivery order.
    ///
    /// Never sleeps; transport faults surface unchanged.
    pub fn run_once(&mut self) -> Result<()> {
        let states = self.transport.drain_states()?;
        for state in states {
            self.handle_robot_state(state);
        }
        Ok(())
    }

    /// Names of all robots seen so far, sorted.
    pub fn robot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.robots.keys().cloned().collect();
        names.sort();
        names
    }

    /// The robot with this name, if it has reported at least once.
    pub fn robot(&self, robot_name: &str) -> Option<&RobotInfo> {
        self.robots.get(robot_name)
    }

    /// All robots seen so far, in name order.
    pub fn all_robots(&self) -> Vec<&RobotInfo> {
        let mut robots: Vec<&RobotInfo> = self.robots.values().collect();
        robots.sort_by(|a, b| a.name().cmp(b.name()));
        robots
    }

    /// Request a robot to pause.
    ///
    /// Returns the allocated command id, or `None` when no robot of this
    /// name is registered.
    pub fn request_pause(&mut self, robot_name: &str) -> Option<CommandId> {
        self.request_mode(robot_name, ModeKind::Pause)
    }

    /// Request a robot to resume.
    ///
    /// Returns the allocated command id, or `None` when no robot of this
    /// name is registered.
    pub fn request_resume(&mut self, robot_name: &str) -> Option<CommandId> {
        self.request_mode(robot_name, ModeKind::Resume)
    }

    /// Request a robot to dock at the named dock.
    ///
    /// Returns the allocated command id, or `None` when no robot of this
    /// name is registered.
    pub fn request_dock(&mut self, robot_name: &str, dock_name: &str) -> Option<CommandId> {
        self.request_mode(robot_name, ModeKind::Dock(dock_name.to_string()))
    }

    /// Request a robot to relocalize to `location`.
    ///
    /// Admitted when the robot is registered, the declared last-visited
    /// waypoint exists on the graph, and the requested location lies
    /// strictly within the configured relocalization radius of that
    /// waypoint. Returns `None` otherwise, consuming nothing.
    pub fn request_relocalization(
        &mut self,
        robot_name: &str,
        location: &Location,
        last_visited_waypoint_index: usize,
    ) -> Option<CommandId> {
        if !self.robots.contains_key(robot_name) {
            log::debug!(
                "Relocalization request for unknown robot [{}], ignoring",
                robot_name
            );
            return None;
        }
        let waypoint = match self.graph.waypoint(last_visited_waypoint_index) {
            Some(wp) => wp,
            None => {
                log::debug!(
                    "Last visited waypoint [{}] does not exist on the graph, ignoring relocalization request",
                    last_visited_waypoint_index
                );
                return None;
            }
        };
        let dist = waypoint.position.distance(&location.position);
        if dist >= self.config.relocalization_radius {
            log::debug!(
                "Relocalization location is {} away from last visited waypoint [{}], limit {}, ignoring request",
                dist,
                last_visited_waypoint_index,
                self.config.relocalization_radius
            );
            return None;
        }

        let command_id = self.next_command_id();
        let request = RelocalizationRequest {
            robot_name: robot_name.to_string(),
            command_id,
            location: self.to_robot_transform.forward(location),
            last_visited_waypoint_index,
        };
        if let Err(e) = self.transport.send_relocalization_request(&request) {
            log::error!(
                "Failed to send relocalization request [{}] to robot [{}]: {}",
                command_id,
                robot_name,
                e
            );
        }
        self.allocate(
            robot_name,
            command_id,
            RequestKind::Relocalization {
                location: location.clone(),
                last_visited_waypoint_index,
            },
        );
        Some(command_id)
    }

    /// Request a robot to follow `path` through the graph.
    ///
    /// Admitted when the robot is registered, the path is non-empty and
    /// every referenced waypoint exists on the graph. Connectivity is
    /// not checked; a valid path over a disconnected graph is still
    /// admitted. Returns `None` otherwise, consuming nothing.
    pub fn request_navigation(
        &mut self,
        robot_name: &str,
        path: &[NavigationPoint],
    ) -> Option<CommandId> {
        if !self.robots.contains_key(robot_name) {
            log::debug!(
                "Navigation request for unknown robot [{}], ignoring",
                robot_name
            );
            return None;
        }
        if path.is_empty() {
            log::debug!(
                "Navigation request for robot [{}] with an empty path, ignoring",
                robot_name
            );
            return None;
        }

        let mut wire_path = Vec::with_capacity(path.len());
        for (i, point) in path.iter().enumerate() {
            let waypoint = match self.graph.waypoint(point.waypoint_index) {
                Some(wp) => wp,
                None => {
                    log::debug!(
                        "Navigation point [{}] references waypoint [{}] that does not exist on the graph, ignoring request",
                        i,
                        point.waypoint_index
                    );
                    return None;
                }
            };
            let location = Location::new(
                waypoint.map_name.clone(),
                waypoint.position,
                point.yaw.unwrap_or(0.0),
            );
            wire_path.push(PathWaypoint {
                waypoint_index: point.waypoint_index,
                location: self.to_robot_transform.forward(&location),
                wait_until_us: point.wait_until_us,
            });
        }

        let command_id = self.next_command_id();
        let request = NavigationRequest {
            robot_name: robot_name.to_string(),
            command_id,
            path: wire_path,
        };
        if let Err(e) = self.transport.send_navigation_request(&request) {
            log::error!(
                "Failed to send navigation request [{}] to robot [{}]: {}",
                command_id,
                robot_name,
                e
            );
        }
        self.allocate(
            robot_name,
            command_id,
            RequestKind::Navigation {
                path: path.to_vec(),
            },
        );
        Some(command_id)
    }

    fn request_mode(&mut self, robot_name: &str, kind: ModeKind) -> Option<CommandId> {
        if !self.robots.contains_key(robot_name) {
            log::debug!("Mode request for unknown robot [{}], ignoring", robot_name);
            return None;
        }

        let command_id = self.next_command_id();
        let request = ModeRequest {
            robot_name: robot_name.to_string(),
            command_id,
            kind: kind.clone(),
        };
        if let Err(e) = self.transport.send_mode_request(&request) {
            log::error!(
                "Failed to send mode request [{}] to robot [{}]: {}",
                command_id,
                robot_name,
                e
            );
        }
        self.allocate(robot_name, command_id, RequestKind::Mode { kind });
        Some(command_id)
    }

    fn next_command_id(&mut self) -> CommandId {
        self.current_command_id += 1;
        self.current_command_id
    }

    fn allocate(&mut self, robot_name: &str, command_id: CommandId, kind: RequestKind) {
        let issued_at_us = (self.time_now_fn)();
        if let Some(robot) = self.robots.get_mut(robot_name) {
            robot.allocate_request(RequestRecord::new(command_id, kind, issued_at_us));
        }
    }

    /// Apply one inbound state report: map it into the manager frame,
    /// register the robot when unknown, and update its tracking.
    fn handle_robot_state(&mut self, state: RobotState) {
        let location = self.to_robot_transform.backward(state.location());
        let state = state.with_location(location);
        let robot_name = state.name().to_string();
        let now_us = (self.time_now_fn)();

        match self.robots.get_mut(&robot_name) {
            Some(robot) => robot.update_state(state, now_us),
            None => {
                let robot = RobotInfo::new(
                    state,
                    self.graph.clone(),
                    self.config.waypoint_nearness,
                    now_us,
                );
                self.robots.insert(robot_name.clone(), robot);
                log::info!(
                    "Fleet [{}] registered new robot: [{}]",
                    self.config.fleet_name,
                    robot_name
                );
            }
        }

        if let Some(callback) = self.robot_updated_callback.as_mut() {
            if let Some(robot) = self.robots.get(&robot_name) {
                callback(robot);
            }
        }
    }
}
