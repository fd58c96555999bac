use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Time source for the study engine. `Fixed` keeps tests deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Calendar date stamped onto progress records.
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(t) => t.date_naive(),
        }
    }

    /// Moves a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

#[cfg(test)]
pub(crate) fn fixed_now() -> DateTime<Utc> {
    // 2024-08-22T10:00:00Z
    DateTime::<Utc>::from_timestamp(1_724_320_800, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = Clock::fixed(fixed_now());
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2024, 8, 22).unwrap()
        );
    }

    #[test]
    fn advance_moves_fixed_clock_only() {
        let mut clock = Clock::fixed(fixed_now());
        clock.advance(Duration::days(2));
        assert_eq!(
            clock.today(),
            NaiveDate::from_ymd_opt(2024, 8, 24).unwrap()
        );

        let mut system = Clock::System;
        system.advance(Duration::days(2));
        assert!(matches!(system, Clock::System));
    }
}
