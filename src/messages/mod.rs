//! Message types exchanged between the manager and its robots.
//!
//! Inbound: [`RobotState`] reports, already deserialized by the
//! transport. Outbound: [`ModeRequest`], [`NavigationRequest`] and
//! [`RelocalizationRequest`], serialized by the transport. All types
//! derive serde so the framing stays a transport concern.

mod location;
mod mode;
mod request;
mod state;

pub use location::{Location, Point2D};
pub use mode::RobotMode;
pub use request::{
    ModeKind, ModeRequest, NavigationPoint, NavigationRequest, PathWaypoint,
    RelocalizationRequest,
};
pub use state::RobotState;

/// Identifier of one outbound command across its lifecycle.
///
/// Allocated monotonically by the manager starting at 1; the wire value 0
/// is reserved to mean "no command" and never appears as an allocated id.
pub type CommandId = u32;
