//! Planar geometry over the navigation graph.
//!
//! Pure functions used by the tracking state machine to reconcile a
//! reported position with waypoints and lanes. All distances are in
//! graph units; the nearness threshold is supplied by the caller so one
//! configured value is used consistently.

use std::f64::consts::PI;

use crate::graph::NavGraph;
use crate::messages::Point2D;

/// Normalize an angle to `[-π, π]`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

/// Whether `position` lies within `threshold` of the waypoint.
///
/// Out-of-range indices are never near.
pub fn is_near_waypoint(
    graph: &NavGraph,
    waypoint_index: usize,
    position: Point2D,
    threshold: f64,
) -> bool {
    match graph.waypoint(waypoint_index) {
        Some(wp) => wp.position.distance(&position) < threshold,
        None => false,
    }
}

/// Whether `position` projects onto the lane segment longitudinally.
///
/// Projects `position - entry` onto the entry→exit direction and checks
/// the scalar lies within `[0, length]`. Lateral offset is not bounded
/// here; see [`nearest_lane`] for the perpendicular distance.
pub fn is_within_lane(graph: &NavGraph, lane_index: usize, position: Point2D) -> bool {
    let lane = match graph.lane(lane_index) {
        Some(lane) => lane,
        None => return false,
    };
    let (entry, exit) = match (graph.waypoint(lane.entry), graph.waypoint(lane.exit)) {
        (Some(entry), Some(exit)) => (entry.position, exit.position),
        _ => return false,
    };

    let length = entry.distance(&exit);
    if length == 0.0 {
        // Degenerate lane between coincident waypoints
        return false;
    }
    let dx = (exit.x - entry.x) / length;
    let dy = (exit.y - entry.y) / length;
    let s = (position.x - entry.x) * dx + (position.y - entry.y) * dy;
    (0.0..=length).contains(&s)
}

/// Waypoint closest to `position`, with its distance.
///
/// Ties resolve to the smallest index. Returns `None` only for an empty
/// graph.
pub fn nearest_waypoint(graph: &NavGraph, position: Point2D) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, wp) in graph.waypoints().iter().enumerate() {
        let dist = wp.position.distance(&position);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }
    best
}

/// Lane longitudinally containing `position` with the smallest
/// perpendicular distance to its infinite entry–exit line.
///
/// The line is the cross product of the homogeneous endpoint coordinates;
/// perpendicular distance is `|ax + by + c| / sqrt(a² + b²)`. Ties
/// resolve to the smallest index. Returns `None` when no lane contains
/// `position`.
pub fn nearest_lane(graph: &NavGraph, position: Point2D) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for lane_index in 0..graph.num_lanes() {
        if !is_within_lane(graph, lane_index, position) {
            continue;
        }
        let lane = graph.lane(lane_index)?;
        let entry = graph.waypoint(lane.entry)?.position;
        let exit = graph.waypoint(lane.exit)?.position;

        // Line through entry and exit: (a, b, c) = entry × exit in
        // homogeneous coordinates, with the point w-components at 1.
        let a = entry.y - exit.y;
        let b = exit.x - entry.x;
        let c = entry.x * exit.y - exit.x * entry.y;
        let denom = (a * a + b * b).sqrt();
        if denom == 0.0 {
            continue;
        }
        let dist = (a * position.x + b * position.y + c).abs() / denom;
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((lane_index, dist)),
        }
    }
    best
}
