use chrono::{DateTime, Duration, Utc};

/// Source of "now" for the services layer, fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Time elapsed since `start`, clamped at zero.
    #[must_use]
    pub fn elapsed_since(&self, start: DateTime<Utc>) -> Duration {
        (self.now() - start).max(Duration::zero())
    }
}

/// Time left until `deadline`, saturating at zero once it has passed.
#[must_use]
pub fn remaining_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (deadline - now).max(Duration::zero())
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_measures_elapsed_time() {
        let clock = Clock::fixed(fixed_now() + Duration::seconds(90));
        assert_eq!(clock.elapsed_since(fixed_now()), Duration::seconds(90));
    }

    #[test]
    fn remaining_saturates_after_deadline() {
        let deadline = fixed_now() + Duration::minutes(5);
        assert_eq!(remaining_until(deadline, fixed_now()), Duration::minutes(5));
        assert_eq!(
            remaining_until(deadline, deadline + Duration::seconds(1)),
            Duration::zero()
        );
    }

    #[test]
    fn elapsed_never_negative() {
        let clock = Clock::fixed(fixed_now());
        let later = fixed_now() + Duration::minutes(1);
        assert_eq!(clock.elapsed_since(later), Duration::zero());
    }
}
