//! Transport seam between the manager and its robots.
//!
//! The manager never frames or parses bytes; it drains already-decoded
//! state reports and hands off encoded-ready request messages. Any
//! middleware (DDS, MQTT, plain sockets) plugs in behind
//! [`FleetTransport`].

mod channel;
mod mock;

pub use channel::{ChannelTransport, RobotEndpoint};
pub use mock::MockTransport;

use crate::error::Result;
use crate::messages::{ModeRequest, NavigationRequest, RelocalizationRequest, RobotState};

/// Transport trait for manager ⇄ robot communication.
///
/// `drain_states` must be non-blocking; a transport that blocks there is
/// broken. Send operations may block briefly and surface their faults
/// unchanged; the manager never retries.
pub trait FleetTransport: Send {
    /// Take every state report currently available, in delivery order.
    fn drain_states(&mut self) -> Result<Vec<RobotState>>;

    /// Send a mode change command to its target robot.
    fn send_mode_request(&mut self, request: &ModeRequest) -> Result<()>;

    /// Send a navigation command to its target robot.
    fn send_navigation_request(&mut self, request: &NavigationRequest) -> Result<()>;

    /// Send a relocalization command to its target robot.
    fn send_relocalization_request(&mut self, request: &RelocalizationRequest) -> Result<()>;
}
