//! Tick scheduler - the single periodic timer driving the simulation

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::SchedulerError;

/// Handle of an interval registered with a `TimerHost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Host-provided periodic timers (a browser's `setInterval`, a game loop, ...)
pub trait TimerHost {
    fn set_interval(&mut self, period: Duration) -> TimerId;
    fn clear_interval(&mut self, id: TimerId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No timer registered
    Idle,
    /// Exactly one timer registered
    Running { timer: TimerId },
}

/// Idle/running state machine around one host timer
#[derive(Debug, Clone)]
pub struct TickScheduler {
    state: SchedulerState,
    period: Duration,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            period,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    /// Idle → running. Registering a second timer is refused.
    pub fn start(&mut self, host: &mut dyn TimerHost) -> Result<TimerId, SchedulerError> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }
        let timer = host.set_interval(self.period);
        self.state = SchedulerState::Running { timer };
        log::info!("Tick scheduler started ({} ms period)", self.period.as_millis());
        Ok(timer)
    }

    /// Running → idle. Safe to call when idle; returns whether a timer was cleared.
    pub fn stop(&mut self, host: &mut dyn TimerHost) -> bool {
        match self.state {
            SchedulerState::Running { timer } => {
                host.clear_interval(timer);
                self.state = SchedulerState::Idle;
                log::info!("Tick scheduler stopped");
                true
            }
            SchedulerState::Idle => false,
        }
    }
}

/// Timer host that only records registrations; the caller fires ticks itself.
/// Used by the harness loop and by tests.
#[derive(Debug, Clone, Default)]
pub struct ManualTimerHost {
    next_id: u64,
    armed: BTreeMap<TimerId, Duration>,
    cleared: usize,
}

impl ManualTimerHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.contains_key(&id)
    }

    /// Number of currently registered intervals
    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Number of `clear_interval` calls that removed a live timer
    pub fn cleared_count(&self) -> usize {
        self.cleared
    }
}

impl TimerHost for ManualTimerHost {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed.insert(id, period);
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        if self.armed.remove(&id).is_some() {
            self.cleared += 1;
        }
    }
}
