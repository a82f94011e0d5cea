//! Process-wide acquisition state

/// Logical sampling state driven by client commands.
///
/// Owned by the listener for the lifetime of the process and lent to one
/// session at a time, so values set by one client are still in place for the
/// next. Nothing consumes these values yet; they are recorded so a sampling
/// task can pick them up later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcquisitionState {
    running: bool,
    rate_hz: Option<u32>,
}

impl AcquisitionState {
    /// Stopped, with no rate requested yet
    pub const fn new() -> Self {
        Self {
            running: false,
            rate_hz: None,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Requested sampling rate, `None` until the first valid `SET_RATE`
    pub const fn rate_hz(&self) -> Option<u32> {
        self.rate_hz
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn set_rate(&mut self, rate_hz: u32) {
        self.rate_hz = Some(rate_hz);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stopped_without_rate() {
        let state = AcquisitionState::new();
        assert!(!state.is_running());
        assert_eq!(state.rate_hz(), None);
        assert_eq!(state, AcquisitionState::default());
    }

    #[test]
    fn test_start_stop_are_idempotent() {
        let mut state = AcquisitionState::new();
        state.stop();
        assert!(!state.is_running());

        state.start();
        state.start();
        assert!(state.is_running());

        state.stop();
        state.stop();
        assert!(!state.is_running());
    }

    #[test]
    fn test_set_rate_keeps_running_flag() {
        let mut state = AcquisitionState::new();
        state.start();
        state.set_rate(250);
        assert_eq!(state.rate_hz(), Some(250));
        assert!(state.is_running());
    }
}
