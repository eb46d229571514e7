//! Alarm timer and daily schedule
//!
//! The alarm is a singleton two-state machine. While it rings the motion
//! integrator adds a vibration force to every particle; it goes idle when the
//! integrator observes the end time or when the host stops it.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Alarm timer state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AlarmState {
    /// Not ringing
    #[default]
    Idle,
    /// Ringing until the monotonic clock reaches `ends_at_ms`
    Ringing {
        /// Clock reading (ms) at which the alarm expires
        ends_at_ms: f64,
    },
}

/// Singleton alarm timer
///
/// # Example
/// ```
/// use weather_drift_core::AlarmTimer;
///
/// let mut alarm = AlarmTimer::new();
/// alarm.start(1_000.0, 500.0);
/// assert!(alarm.is_ringing());
///
/// assert!(!alarm.expire(1_499.0));
/// assert!(alarm.expire(1_500.0));
/// assert!(!alarm.is_ringing());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlarmTimer {
    state: AlarmState,
}

impl AlarmTimer {
    /// Create an idle timer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ringing for `duration_ms` from `now_ms`
    ///
    /// Re-triggering a ringing alarm replaces its end time; alarms never
    /// queue. A negative or non-finite duration rings for zero milliseconds,
    /// which the next integrator step expires.
    pub fn start(&mut self, now_ms: f64, duration_ms: f64) {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        let ends_at_ms = now_ms + duration_ms;
        let retrigger = self.is_ringing();
        self.state = AlarmState::Ringing { ends_at_ms };
        info!(
            "Alarm {}: ringing for {:.0}ms (ends at {:.0}ms)",
            if retrigger { "re-triggered" } else { "started" },
            duration_ms,
            ends_at_ms
        );
    }

    /// Stop immediately
    ///
    /// Idempotent. Returns whether the alarm was ringing.
    pub fn stop(&mut self) -> bool {
        let was_ringing = self.is_ringing();
        if was_ringing {
            info!("Alarm stopped");
        }
        self.state = AlarmState::Idle;
        was_ringing
    }

    /// Go idle if `clock_ms` has reached the end time
    ///
    /// Returns whether this call transitioned the alarm to idle.
    pub fn expire(&mut self, clock_ms: f64) -> bool {
        match self.state {
            AlarmState::Ringing { ends_at_ms } if clock_ms >= ends_at_ms => {
                self.state = AlarmState::Idle;
                info!("Alarm expired at {:.0}ms", clock_ms);
                true
            }
            _ => false,
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Whether the alarm is ringing
    #[inline]
    #[must_use]
    pub fn is_ringing(&self) -> bool {
        matches!(self.state, AlarmState::Ringing { .. })
    }

    /// End time while ringing
    #[inline]
    #[must_use]
    pub fn ends_at_ms(&self) -> Option<f64> {
        match self.state {
            AlarmState::Ringing { ends_at_ms } => Some(ends_at_ms),
            AlarmState::Idle => None,
        }
    }

    /// Milliseconds left before expiry, 0 once passed, `None` when idle
    #[must_use]
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.ends_at_ms().map(|end| (end - now_ms).max(0.0))
    }
}

/// Minutes in a day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Daily alarm schedule set from the host UI
///
/// Fires at most once per calendar day, on the first poll at or after the
/// scheduled minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmSchedule {
    /// Minute of the day to ring at (0-1439)
    pub minute_of_day: u16,

    /// Day number of the last trigger, so the alarm rings once per day
    last_fired_day: Option<u32>,
}

impl AlarmSchedule {
    /// Schedule for `hour:minute` local time (values wrap into a day)
    #[must_use]
    pub fn at(hour: u16, minute: u16) -> Self {
        let total = u32::from(hour) * 60 + u32::from(minute);
        AlarmSchedule {
            minute_of_day: (total % u32::from(MINUTES_PER_DAY)) as u16,
            last_fired_day: None,
        }
    }

    /// Whether the alarm should fire now
    ///
    /// # Arguments
    /// * `enabled` - The host's alarm toggle
    /// * `day` - Any monotonically increasing day counter (e.g. days since epoch)
    /// * `minute_of_day` - Current local minute of the day
    #[must_use]
    pub fn due(&self, enabled: bool, day: u32, minute_of_day: u16) -> bool {
        enabled && minute_of_day >= self.minute_of_day && self.last_fired_day != Some(day)
    }

    /// Start `timer` when due; returns whether it fired
    pub fn poll(
        &mut self,
        enabled: bool,
        day: u32,
        minute_of_day: u16,
        now_ms: f64,
        duration_ms: f64,
        timer: &mut AlarmTimer,
    ) -> bool {
        if !self.due(enabled, day, minute_of_day) {
            return false;
        }
        self.last_fired_day = Some(day);
        info!(
            "Scheduled alarm due at minute {} (day {})",
            self.minute_of_day, day
        );
        timer.start(now_ms, duration_ms);
        true
    }
}
