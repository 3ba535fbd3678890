use chrono::{DateTime, Duration, Utc};

/// Minimum spacing between two exit logs of the same student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    minutes: i64,
}

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    Permit,
    /// The previous exit is too recent; `remaining` is left until a new one is allowed.
    Deny { remaining: Duration },
}

impl CooldownPolicy {
    /// Negative values are treated as zero (no cooldown).
    pub fn from_minutes(minutes: i64) -> Self {
        Self {
            minutes: minutes.max(0),
        }
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn window(&self) -> Duration {
        Duration::minutes(self.minutes)
    }

    /// Decide whether an exit at `now` is allowed given the student's latest exit.
    ///
    /// An equal timestamp, or a latest exit lying in the future, counts as within the window.
    pub fn check(&self, last_exit: Option<DateTime<Utc>>, now: DateTime<Utc>) -> CooldownDecision {
        let Some(last) = last_exit else {
            return CooldownDecision::Permit;
        };
        let window = self.window();
        if window.is_zero() {
            return CooldownDecision::Permit;
        }
        let elapsed = now - last;
        if elapsed < window {
            CooldownDecision::Deny {
                remaining: window - elapsed,
            }
        } else {
            CooldownDecision::Permit
        }
    }
}
