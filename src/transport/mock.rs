//! Mock transport for testing

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::FleetTransport;
use crate::error::Result;
use crate::messages::{ModeRequest, NavigationRequest, RelocalizationRequest, RobotState};

/// Mock transport for unit testing.
///
/// Clones share one buffer, so a test can keep a handle while the
/// manager owns the boxed transport.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    pending_states: VecDeque<RobotState>,
    mode_requests: Vec<ModeRequest>,
    navigation_requests: Vec<NavigationRequest>,
    relocalization_requests: Vec<RelocalizationRequest>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a state report for the next drain
    pub fn inject_state(&self, state: RobotState) {
        let mut inner = self.inner.lock().unwrap();
        inner.pending_states.push_back(state);
    }

    /// All mode requests sent so far
    pub fn sent_mode_requests(&self) -> Vec<ModeRequest> {
        self.inner.lock().unwrap().mode_requests.clone()
    }

    /// All navigation requests sent so far
    pub fn sent_navigation_requests(&self) -> Vec<NavigationRequest> {
        self.inner.lock().unwrap().navigation_requests.clone()
    }

    /// All relocalization requests sent so far
    pub fn sent_relocalization_requests(&self) -> Vec<RelocalizationRequest> {
        self.inner.lock().unwrap().relocalization_requests.clone()
    }

    /// Total number of requests sent, across all kinds
    pub fn sent_request_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.mode_requests.len()
            + inner.navigation_requests.len()
            + inner.relocalization_requests.len()
    }
}

impl FleetTransport for MockTransport {
    fn drain_states(&mut self) -> Result<Vec<RobotState>> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.pending_states.drain(..).collect())
    }

    fn send_mode_request(&mut self, request: &ModeRequest) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.mode_requests.push(request.clone());
        Ok(())
    }

    fn send_navigation_request(&mut self, request: &NavigationRequest) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.navigation_requests.push(request.clone());
        Ok(())
    }

    fn send_relocalization_request(&mut self, request: &RelocalizationRequest) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.relocalization_requests.push(request.clone());
        Ok(())
    }
}
