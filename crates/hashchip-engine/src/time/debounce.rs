use std::time::{Duration, Instant};

/// Result of reporting a change to a [`Debouncer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A pass is now scheduled for the given instant.
    Scheduled(Instant),
    /// A pass was already pending or running; the change is dropped.
    Coalesced,
}

/// Marks the single relabel pass currently running.
///
/// Returned by [`Debouncer::poll`] and consumed by [`Debouncer::finish`].
/// While it is outstanding every trigger is coalesced, which also swallows
/// the change notifications caused by the pass's own writes.
#[must_use = "a pass token must be handed back to `Debouncer::finish`"]
#[derive(Debug, PartialEq, Eq)]
pub struct PassToken {
    id: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Pending { due: Instant },
    Running { id: u64 },
}

/// Coalesces bursts of change notifications into single passes.
///
/// The first notification after an idle period schedules a pass `window`
/// later. Notifications that arrive while that pass is pending or running
/// are dropped rather than queued: a pass always relabels every block, so
/// the scheduled one already covers them.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    state: State,
    next_id: u64,
    coalesced: u64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, state: State::Idle, next_id: 0, coalesced: 0 }
    }

    /// Reports a change observed at `now`.
    pub fn trigger(&mut self, now: Instant) -> Trigger {
        self.schedule_at(now + self.window)
    }

    /// Schedules a pass for `due` unless one is already pending or running.
    pub fn schedule_at(&mut self, due: Instant) -> Trigger {
        match self.state {
            State::Idle => {
                self.state = State::Pending { due };
                Trigger::Scheduled(due)
            }
            State::Pending { .. } | State::Running { .. } => {
                self.coalesced += 1;
                Trigger::Coalesced
            }
        }
    }

    /// When the pending pass is due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::Pending { due } => Some(due),
            _ => None,
        }
    }

    /// Starts the pending pass if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<PassToken> {
        match self.state {
            State::Pending { due } if now >= due => {
                let id = self.next_id;
                self.next_id = self.next_id.wrapping_add(1);
                self.state = State::Running { id };
                Some(PassToken { id })
            }
            _ => None,
        }
    }

    /// Ends the running pass. Returns `false` for a token that does not
    /// belong to the running pass, which is then left untouched.
    pub fn finish(&mut self, token: PassToken) -> bool {
        match self.state {
            State::Running { id } if id == token.id => {
                self.state = State::Idle;
                true
            }
            _ => {
                log::debug!("debounce: ignoring stale pass token {}", token.id);
                false
            }
        }
    }

    /// Number of triggers dropped since construction.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
