use std::time::{Duration, Instant};

use crate::engine::game::GameConfig;

/// Timing policy for gravity and soft drop.
///
/// Two cancellable deadlines — the always-armed gravity timer and the
/// accelerated timer armed only while the soft-drop intent is held — both
/// feed the identical engine step; they differ only in cadence. [`poll`]
/// fires at most one due step per call, so engine mutation stays atomic per
/// step, and [`timeout`] tells the shell how long it may block before the
/// next deadline.
///
/// The gravity deadline is cancelled exactly once, via [`halt`] at the
/// `Running → GameOver` transition; [`rearm`] re-arms it after a reset.
///
/// [`poll`]: Self::poll
/// [`timeout`]: Self::timeout
/// [`halt`]: Self::halt
/// [`rearm`]: Self::rearm
#[derive(Debug)]
pub struct DriveLoop {
    gravity_interval: Duration,
    soft_drop_interval: Duration,
    gravity_due: Option<Instant>,
    soft_drop_due: Option<Instant>,
}

impl DriveLoop {
    /// Creates a drive loop with gravity armed, first due one interval from
    /// `now`.
    #[must_use]
    pub fn start(config: &GameConfig, now: Instant) -> Self {
        Self {
            gravity_interval: config.gravity_interval,
            soft_drop_interval: config.soft_drop_interval,
            gravity_due: Some(now + config.gravity_interval),
            soft_drop_due: None,
        }
    }

    /// Returns true if a step is due, re-arming the deadline that fired.
    /// At most one deadline fires per call; call again to drain.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(due) = self.soft_drop_due
            && now >= due
        {
            self.soft_drop_due = Some(now + self.soft_drop_interval);
            return true;
        }
        if let Some(due) = self.gravity_due
            && now >= due
        {
            self.gravity_due = Some(now + self.gravity_interval);
            return true;
        }
        false
    }

    /// Time remaining until the next armed deadline, or `None` when halted.
    #[must_use]
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|at| at.saturating_duration_since(now))
    }

    fn next_deadline(&self) -> Option<Instant> {
        [self.gravity_due, self.soft_drop_due]
            .into_iter()
            .flatten()
            .min()
    }

    /// Arms the accelerated timer; the first accelerated step is due
    /// immediately. Ignored while the intent is already held or the loop is
    /// halted.
    pub fn start_soft_drop(&mut self, now: Instant) {
        if self.gravity_due.is_some() && self.soft_drop_due.is_none() {
            self.soft_drop_due = Some(now);
        }
    }

    /// Disarms the accelerated timer; the next poll no longer re-arms it.
    pub fn stop_soft_drop(&mut self) {
        self.soft_drop_due = None;
    }

    #[must_use]
    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop_due.is_some()
    }

    /// Cancels both deadlines.
    pub fn halt(&mut self) {
        self.gravity_due = None;
        self.soft_drop_due = None;
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.gravity_due.is_none()
    }

    /// Re-arms gravity (next due one interval from `now`) and clears any
    /// held soft drop.
    pub fn rearm(&mut self, now: Instant) {
        self.gravity_due = Some(now + self.gravity_interval);
        self.soft_drop_due = None;
    }
}
