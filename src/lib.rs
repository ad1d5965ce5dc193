//! # SenaFleet
//!
//! Fleet manager core for coordinating mobile robots over a shared
//! navigation graph.
//!
//! ## Overview
//!
//! A central [`Manager`] drains periodic [`RobotState`] reports from a
//! pluggable [`FleetTransport`], keeps a per-robot [`RobotInfo`] with a
//! continuously updated [`TrackingState`] against the immutable
//! [`NavGraph`], and dispatches pause / resume / dock / navigation /
//! relocalization commands, tracking each to completion through its
//! [`RequestRecord`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sena_fleet::{
//!     ChannelTransport, CoordinateTransformer, FleetConfig, Manager, NavGraph, Point2D,
//! };
//!
//! let mut graph = NavGraph::new();
//! let a = graph.add_waypoint("L1", Point2D::new(0.0, 0.0));
//! let b = graph.add_waypoint("L1", Point2D::new(10.0, 0.0));
//! graph.add_lane(a, b)?;
//!
//! let (transport, robot_endpoint) = ChannelTransport::pair();
//! let mut manager = Manager::new(
//!     FleetConfig::load_default()?,
//!     Arc::new(graph),
//!     Box::new(transport),
//!     Arc::new(CoordinateTransformer::identity()),
//!     Box::new(now_us),
//!     None,
//! )?;
//!
//! loop {
//!     manager.run_once()?;
//!     // cadence is the caller's responsibility
//! }
//! ```
//!
//! ## Threading
//!
//! The core is single-threaded and cooperative: `run_once` and the
//! request methods must be serialized by the caller, and the manager
//! spawns no workers of its own. The graph and coordinate transformer
//! are shared immutably.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod manager;
pub mod messages;
pub mod requests;
pub mod robot;
pub mod transform;
pub mod transport;

pub use config::FleetConfig;
pub use error::{FleetError, Result};
pub use graph::{Lane, NavGraph, Waypoint};
pub use manager::{Manager, RobotUpdatedCallback, TimeNowFn};
pub use messages::{
    CommandId, Location, ModeKind, ModeRequest, NavigationPoint, NavigationRequest, PathWaypoint,
    Point2D, RelocalizationRequest, RobotMode, RobotState,
};
pub use requests::{RequestKind, RequestRecord};
pub use robot::{RobotInfo, TrackingState};
pub use transform::CoordinateTransformer;
pub use transport::{ChannelTransport, FleetTransport, MockTransport, RobotEndpoint};
