/// One-shot cancellable delay, driven by caller-supplied millisecond
/// timestamps so tests never sleep. Replaces the usual tangle of "is a timer
/// pending" booleans: a token is either armed with a deadline or it isn't,
/// and `fire` returns true at most once per arm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelayToken {
    deadline_ms: Option<u64>,
}

impl DelayToken {
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Armed and the deadline has not passed yet.
    pub fn is_live(&self, now_ms: u64) -> bool {
        self.deadline_ms.map_or(false, |deadline| now_ms < deadline)
    }

    /// Consumes the deadline when it has elapsed. A fired or cancelled token
    /// stays quiet until re-armed.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
