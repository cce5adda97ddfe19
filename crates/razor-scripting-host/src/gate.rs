//! Per-script timeout gate behind every blocking verb.
//!
//! A blocking verb asks the gate on each firing whether its timeout has
//! run out. The first ask arms the gate; later asks compare against the
//! armed deadline. Expiry disarms, so the next blocking verb starts fresh.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    #[default]
    Idle,
    Pending {
        deadline: Instant,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Keep waiting; the instruction will be retried
    Pending,
    /// The timeout has elapsed and the gate is idle again
    Expired,
}

#[derive(Debug, Default)]
pub struct PauseGate {
    phase: GatePhase,
}

impl PauseGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm on first use, report expiry afterwards.
    ///
    /// `timeout` only matters when arming; a pending gate keeps the deadline
    /// it was armed with. Arming always reports `Pending`, even for a zero
    /// timeout, so a blocking verb yields at least one firing.
    pub fn check_and_arm(&mut self, now: Instant, timeout: Duration) -> GateStatus {
        match self.phase {
            GatePhase::Idle => {
                self.phase = GatePhase::Pending {
                    deadline: now + timeout,
                };
                GateStatus::Pending
            }
            GatePhase::Pending { deadline } if now >= deadline => {
                self.phase = GatePhase::Idle;
                GateStatus::Expired
            }
            GatePhase::Pending { .. } => GateStatus::Pending,
        }
    }

    /// Disarm without waiting for the deadline
    pub fn cancel(&mut self) {
        self.phase = GatePhase::Idle;
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GatePhase::Idle
    }
}
