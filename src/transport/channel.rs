//! In-process transport over crossbeam channels.
//!
//! Pairs a manager with robot simulators (or bridge threads feeding a
//! real middleware) running in the same process. The manager side drains
//! with `try_recv`, so `drain_states` never blocks.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use super::FleetTransport;
use crate::error::{FleetError, Result};
use crate::messages::{ModeRequest, NavigationRequest, RelocalizationRequest, RobotState};

/// Manager side of an in-process transport pair.
pub struct ChannelTransport {
    states_rx: Receiver<RobotState>,
    mode_tx: Sender<ModeRequest>,
    navigation_tx: Sender<NavigationRequest>,
    relocalization_tx: Sender<RelocalizationRequest>,
}

/// Robot side of an in-process transport pair.
///
/// Clone one per simulated robot; state reports from all clones funnel
/// into the same manager queue.
#[derive(Clone)]
pub struct RobotEndpoint {
    states_tx: Sender<RobotState>,
    mode_rx: Receiver<ModeRequest>,
    navigation_rx: Receiver<NavigationRequest>,
    relocalization_rx: Receiver<RelocalizationRequest>,
}

impl ChannelTransport {
    /// Create a connected manager/robot transport pair.
    pub fn pair() -> (ChannelTransport, RobotEndpoint) {
        let (states_tx, states_rx) = unbounded();
        let (mode_tx, mode_rx) = unbounded();
        let (navigation_tx, navigation_rx) = unbounded();
        let (relocalization_tx, relocalization_rx) = unbounded();
        (
            ChannelTransport {
                states_rx,
                mode_tx,
                navigation_tx,
                relocalization_tx,
            },
            RobotEndpoint {
                states_tx,
                mode_rx,
                navigation_rx,
                relocalization_rx,
            },
        )
    }
}

impl FleetTransport for ChannelTransport {
    fn drain_states(&mut self) -> Result<Vec<RobotState>> {
        let mut states = Vec::new();
        loop {
            match self.states_rx.try_recv() {
                Ok(state) => states.push(state),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if states.is_empty() {
                        return Err(FleetError::Transport(
                            "state channel disconnected".into(),
                        ));
                    }
                    break;
                }
            }
        }
        Ok(states)
    }

    fn send_mode_request(&mut self, request: &ModeRequest) -> Result<()> {
        self.mode_tx
            .send(request.clone())
            .map_err(|e| FleetError::Transport(e.to_string()))
    }

    fn send_navigation_request(&mut self, request: &NavigationRequest) -> Result<()> {
        self.navigation_tx
            .send(request.clone())
            .map_err(|e| FleetError::Transport(e.to_string()))
    }

    fn send_relocalization_request(&mut self, request: &RelocalizationRequest) -> Result<()> {
        self.relocalization_tx
            .send(request.clone())
            .map_err(|e| FleetError::Transport(e.to_string()))
    }
}

impl RobotEndpoint {
    /// Report a robot state to the manager.
    pub fn send_state(&self, state: RobotState) -> Result<()> {
        self.states_tx
            .send(state)
            .map_err(|e| FleetError::Transport(e.to_string()))
    }

    /// Next pending mode request, if any.
    pub fn try_recv_mode_request(&self) -> Option<ModeRequest> {
        self.mode_rx.try_recv().ok()
    }

    /// Next pending navigation request, if any.
    pub fn try_recv_navigation_request(&self) -> Option<NavigationRequest> {
        self.navigation_rx.try_recv().ok()
    }

    /// Next pending relocalization request, if any.
    pub fn try_recv_relocalization_request(&self) -> Option<RelocalizationRequest> {
        self.relocalization_rx.try_recv().ok()
    }
}
