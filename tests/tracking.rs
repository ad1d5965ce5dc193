//! Tracking state machine behavior, driven directly through RobotInfo.

mod common;

use common::*;
use sena_fleet::{
    Location, ModeKind, NavigationPoint, Point2D, RequestKind, RequestRecord, TrackingState,
};

fn nav_path(indices: &[usize]) -> Vec<NavigationPoint> {
    indices.iter().map(|&i| NavigationPoint::new(i)).collect()
}

#[test]
fn bootstrap_on_waypoint() {
    let robot = make_robot("bot", 0.0, 0.0);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(0));
    assert_eq!(robot.first_found_us(), robot.last_updated_us());
}

#[test]
fn bootstrap_near_waypoint_within_threshold() {
    let robot = make_robot("bot", 10.0 - 0.5 + 1e-3, 0.0);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));
}

#[test]
fn bootstrap_far_from_graph_is_lost() {
    let robot = make_robot("bot", 42.0, -17.0);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn on_waypoint_stays_within_threshold() {
    let mut robot = make_robot("bot", 10.0, 0.0);
    robot.update_state(state_at("bot", 9.6, 0.0), 1);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));
}

#[test]
fn command_free_motion_is_loss() {
    // A robot with nothing to do should not be moving: leaving the
    // waypoint without a command means it has diverged.
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.update_state(state_at("bot", 5.0, 0.0), 1);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn command_free_jump_between_waypoints_is_loss() {
    // Even landing exactly on another waypoint is divergence when no
    // command justifies the motion.
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.update_state(state_at("bot", 10.0, 0.0), 1);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn lost_robot_recovers_near_a_waypoint() {
    let mut robot = make_robot("bot", 42.0, -17.0);
    assert_eq!(robot.tracking(), TrackingState::Lost);

    robot.update_state(state_at("bot", 10.0 - 0.5 + 1e-3, 0.0), 1);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));
}

#[test]
fn lost_robot_stays_lost_away_from_waypoints() {
    let mut robot = make_robot("bot", 42.0, -17.0);
    robot.update_state(state_at("bot", 5.0, 5.0), 1);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn navigation_places_robot_on_lane() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));

    // Heading for path entry 1 (waypoint 1), halfway down the lane.
    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnLane(0));
}

#[test]
fn navigation_reaches_target_waypoint() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));

    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnLane(0));

    robot.update_state(state_with_command("bot", 9.6, 0.0, 1, Some(1), false), 2);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));
}

#[test]
fn navigation_round_trip_through_lane() {
    // OnWaypoint(w) -> OnLane/TowardsWaypoint(w') -> OnWaypoint(w'),
    // with the command completing on the final path waypoint.
    let mut robot = make_robot("bot", 0.0, 0.0);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(0));

    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));

    robot.update_state(state_with_command("bot", 0.0, 0.0, 1, Some(0), false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(0));

    for (t, x) in [(2u64, 1.0), (3, 5.0), (4, 9.0)] {
        robot.update_state(state_with_command("bot", x, 0.0, 1, Some(1), false), t);
        assert!(matches!(
            robot.tracking(),
            TrackingState::OnLane(_) | TrackingState::TowardsWaypoint(1)
        ));
    }

    robot.update_state(state_with_command("bot", 9.8, 0.0, 1, Some(1), false), 5);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));

    let record = robot.request(1).unwrap();
    assert!(record.is_acknowledged());
    assert!(record.is_completed());
}

#[test]
fn navigation_off_lane_is_towards_waypoint() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 3]),
        },
        0,
    ));

    // (5, -3) projects behind the entry of every lane into waypoint 3;
    // en route but off-lane is not loss while the command is active.
    robot.update_state(state_with_command("bot", 5.0, -3.0, 1, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::TowardsWaypoint(3));
}

#[test]
fn towards_waypoint_persists_until_arrival() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 3]),
        },
        0,
    ));
    robot.update_state(state_with_command("bot", 5.0, -3.0, 1, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::TowardsWaypoint(3));

    // Command-free reports keep the hypothesis until the robot shows up.
    robot.update_state(state_at("bot", 6.0, -2.0), 2);
    assert_eq!(robot.tracking(), TrackingState::TowardsWaypoint(3));

    robot.update_state(state_at("bot", 0.0, 9.7), 3);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(3));
}

#[test]
fn navigation_completion_via_command_completed_flag() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));

    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, Some(1), true), 1);
    assert!(robot.request(1).unwrap().is_completed());
}

#[test]
fn navigation_without_target_index_degrades_to_command_free() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));

    // No target reported: command-free rules apply, and motion away
    // from the waypoint is loss.
    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, None, false), 1);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn mode_request_does_not_justify_motion() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Mode {
            kind: ModeKind::Pause,
        },
        0,
    ));

    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, None, false), 1);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn relocalization_snaps_to_last_visited_waypoint() {
    let mut robot = make_robot("bot", 42.0, -17.0);
    assert_eq!(robot.tracking(), TrackingState::Lost);

    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Relocalization {
            location: Location::new(TEST_MAP, Point2D::new(0.0, 10.0), 0.0),
            last_visited_waypoint_index: 3,
        },
        0,
    ));

    robot.update_state(state_with_command("bot", 0.0, 9.7, 1, None, false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(3));
}

#[test]
fn relocalization_away_from_waypoint_falls_back_to_command_free() {
    let mut robot = make_robot("bot", 42.0, -17.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Relocalization {
            location: Location::new(TEST_MAP, Point2D::new(0.0, 10.0), 0.0),
            last_visited_waypoint_index: 3,
        },
        0,
    ));

    // Near waypoint 1, not the declared waypoint 3: command-free rules
    // recover it from Lost onto waypoint 1.
    robot.update_state(state_with_command("bot", 9.8, 0.0, 1, None, false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));
}

#[test]
fn relocalization_completion_marks_record() {
    let mut robot = make_robot("bot", 42.0, -17.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Relocalization {
            location: Location::new(TEST_MAP, Point2D::new(0.0, 10.0), 0.0),
            last_visited_waypoint_index: 3,
        },
        0,
    ));

    robot.update_state(state_with_command("bot", 0.0, 9.7, 1, None, true), 1);
    let record = robot.request(1).unwrap();
    assert!(record.is_acknowledged());
    assert!(record.is_completed());
}

#[test]
fn unknown_command_id_is_tracked_command_free() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    // Command 99 was never allocated through the manager.
    robot.update_state(state_with_command("bot", 5.0, 0.0, 99, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::Lost);
}

#[test]
fn on_lane_exit_reached_command_free() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));
    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnLane(0));

    // The command drops off the report; arriving at the lane exit still
    // resolves to the exit waypoint.
    robot.update_state(state_at("bot", 9.8, 0.0), 2);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(1));
}

#[test]
fn on_lane_slips_back_to_nearest_waypoint() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Navigation {
            path: nav_path(&[0, 1]),
        },
        0,
    ));
    robot.update_state(state_with_command("bot", 5.0, 0.0, 1, Some(1), false), 1);
    assert_eq!(robot.tracking(), TrackingState::OnLane(0));

    // Slightly behind the lane entry: not within the lane, but close
    // enough to waypoint 0 to snap onto it.
    robot.update_state(state_at("bot", -0.3, 0.1), 2);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(0));
}

#[test]
fn tracking_is_idempotent_on_repeated_states() {
    let cases: Vec<(f64, f64)> = vec![(0.0, 0.0), (42.0, -17.0), (9.8, 0.0)];
    for (x, y) in cases {
        let mut robot = make_robot("bot", x, y);
        let first = robot.tracking();
        robot.update_state(state_at("bot", x, y), 1);
        assert_eq!(robot.tracking(), first);
        robot.update_state(state_at("bot", x, y), 2);
        assert_eq!(robot.tracking(), first);
    }
}

#[test]
fn mismatched_name_is_refused() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    let before = robot.last_updated_us();
    robot.update_state(state_at("other", 5.0, 0.0), 7);
    assert_eq!(robot.tracking(), TrackingState::OnWaypoint(0));
    assert_eq!(robot.last_updated_us(), before);
}

#[test]
fn last_updated_never_precedes_first_found() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    for t in 1..5 {
        robot.update_state(state_at("bot", 0.1 * t as f64, 0.0), t);
        assert!(robot.last_updated_us() >= robot.first_found_us());
    }
}

#[test]
fn duplicate_command_id_allocation_is_ignored() {
    let mut robot = make_robot("bot", 0.0, 0.0);
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Mode {
            kind: ModeKind::Pause,
        },
        0,
    ));
    robot.allocate_request(RequestRecord::new(
        1,
        RequestKind::Mode {
            kind: ModeKind::Resume,
        },
        5,
    ));

    // The original record survives.
    let record = robot.request(1).unwrap();
    assert_eq!(
        record.kind(),
        &RequestKind::Mode {
            kind: ModeKind::Pause
        }
    );
    assert_eq!(robot.allocated_requests().count(), 1);
}
