//! Shared fixtures for the integration tests.
//!
//! Provides the cross-shaped test graph used throughout: waypoint 0 at
//! the origin, waypoints 1–4 on the spokes at (±10, 0) and (0, ±10),
//! lanes between the center and every spoke in both directions, plus an
//! isolated waypoint 5 far away at (100, 100).

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sena_fleet::{
    CommandId, CoordinateTransformer, FleetConfig, Location, Manager, MockTransport, NavGraph,
    Point2D, RobotInfo, RobotMode, RobotState,
};

/// Nearness threshold used by every fixture.
pub const NEARNESS: f64 = 0.5;

pub const TEST_MAP: &str = "test_level";

/// The 5-waypoint cross graph plus the isolated far waypoint.
pub fn cross_graph() -> Arc<NavGraph> {
    let mut graph = NavGraph::new();
    graph.add_waypoint(TEST_MAP, Point2D::new(0.0, 0.0));
    graph.add_waypoint(TEST_MAP, Point2D::new(10.0, 0.0));
    graph.add_waypoint(TEST_MAP, Point2D::new(-10.0, 0.0));
    graph.add_waypoint(TEST_MAP, Point2D::new(0.0, 10.0));
    graph.add_waypoint(TEST_MAP, Point2D::new(0.0, -10.0));
    for spoke in 1..=4 {
        graph.add_lane(0, spoke).unwrap();
        graph.add_lane(spoke, 0).unwrap();
    }
    graph.add_waypoint(TEST_MAP, Point2D::new(100.0, 100.0));
    Arc::new(graph)
}

/// A command-free state report at the given position.
pub fn state_at(name: &str, x: f64, y: f64) -> RobotState {
    RobotState::new(
        0,
        name,
        "test_model",
        None,
        false,
        RobotMode::Idle,
        1.0,
        Location::new(TEST_MAP, Point2D::new(x, y), 0.0),
        None,
    )
    .unwrap()
}

/// A state report referencing an in-flight command.
pub fn state_with_command(
    name: &str,
    x: f64,
    y: f64,
    command_id: CommandId,
    target_path_index: Option<usize>,
    command_completed: bool,
) -> RobotState {
    RobotState::new(
        0,
        name,
        "test_model",
        Some(command_id),
        command_completed,
        RobotMode::Moving,
        1.0,
        Location::new(TEST_MAP, Point2D::new(x, y), 0.0),
        target_path_index,
    )
    .unwrap()
}

/// A robot freshly registered from a report at the given position.
pub fn make_robot(name: &str, x: f64, y: f64) -> RobotInfo {
    RobotInfo::new(state_at(name, x, y), cross_graph(), NEARNESS, 0)
}

/// Monotonic microsecond clock for deterministic timestamps.
pub fn test_clock() -> Box<dyn Fn() -> u64 + Send> {
    let ticks = AtomicU64::new(1);
    Box::new(move || ticks.fetch_add(1, Ordering::Relaxed))
}

/// A manager over the cross graph with an identity transform, plus a
/// handle onto its mock transport.
pub fn make_manager() -> (Manager, MockTransport) {
    let transport = MockTransport::new();
    let manager = Manager::new(
        FleetConfig::default(),
        cross_graph(),
        Box::new(transport.clone()),
        Arc::new(CoordinateTransformer::identity()),
        test_clock(),
        None,
    )
    .unwrap();
    (manager, transport)
}

/// Inject a command-free report and tick so the robot is registered.
pub fn register_robot(manager: &mut Manager, transport: &MockTransport, name: &str, x: f64, y: f64) {
    transport.inject_state(state_at(name, x, y));
    manager.run_once().unwrap();
}
