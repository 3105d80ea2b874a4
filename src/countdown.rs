//! Countdown clock shown in the window title.
//!
//! Day counts are full local calendar days (a day only counts once the same
//! wall-clock time has been reached); hours, minutes and seconds are truncated
//! differences reduced modulo the next unit.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use std::cmp::Ordering;

use crate::params::CountdownConfig;

/// Remaining time split into display units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// One once-per-second reading of the clock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountdownReading {
    pub left: TimeLeft,
    pub days_since: i64,
    /// Local time, `hh:mm AM`
    pub clock: String,
}

pub struct Countdown {
    config: CountdownConfig,
}

impl Countdown {
    pub fn new(config: CountdownConfig) -> Self {
        Self { config }
    }

    pub fn read<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> CountdownReading
    where
        Tz::Offset: std::fmt::Display,
    {
        let tz = now.timezone();
        let target = self.config.target.with_timezone(&tz);
        let since = self.config.since.with_timezone(&tz);

        let total = target.clone().signed_duration_since(now.clone());
        let left = TimeLeft {
            days: full_days_between(&target.naive_local(), &now.naive_local()),
            hours: total.num_hours() % 24,
            minutes: total.num_minutes() % 60,
            seconds: total.num_seconds() % 60,
        };

        CountdownReading {
            left,
            days_since: full_days_between(&now.naive_local(), &since.naive_local()),
            clock: now.format("%I:%M %p").to_string(),
        }
    }

    /// Window title for a reading
    pub fn title(&self, reading: &CountdownReading) -> String {
        let TimeLeft {
            days,
            hours,
            minutes,
            seconds,
        } = reading.left;
        format!(
            "{} in {:02}d {:02}h {:02}m {:02}s · {} days since first trailer · {}",
            self.config.label, days, hours, minutes, seconds, reading.days_since, reading.clock
        )
    }
}

/// Signed number of full calendar days from `right` to `left` in local wall-clock time
pub fn full_days_between(left: &NaiveDateTime, right: &NaiveDateTime) -> i64 {
    let sign: i64 = match left.cmp(right) {
        Ordering::Less => -1,
        Ordering::Equal => return 0,
        Ordering::Greater => 1,
    };

    let calendar = (left.date() - right.date()).num_days().abs();

    // Move `left` back by the calendar difference and see whether the last day is complete
    let shifted = *left - TimeDelta::days(sign * calendar);
    let shifted_sign: i64 = match shifted.cmp(right) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    };
    let last_day_not_full = (shifted_sign == -sign) as i64;

    sign * (calendar - last_day_not_full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
            .and_utc()
    }

    fn naive(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        at(y, m, d, h, 0, 0).naive_utc()
    }

    #[test]
    fn test_full_days() {
        assert_eq!(full_days_between(&naive(2025, 9, 23, 0), &naive(2025, 9, 21, 12)), 1);
        assert_eq!(full_days_between(&naive(2025, 9, 23, 0), &naive(2025, 9, 21, 0)), 2);
        assert_eq!(full_days_between(&naive(2025, 9, 21, 12), &naive(2025, 9, 23, 0)), -1);
        assert_eq!(full_days_between(&naive(2025, 9, 23, 0), &naive(2025, 9, 22, 23)), 0);
        assert_eq!(full_days_between(&naive(2025, 9, 23, 0), &naive(2025, 9, 23, 0)), 0);
    }

    #[test]
    fn test_time_left_units() {
        let countdown = Countdown::new(CountdownConfig::default());
        let reading = countdown.read(&at(2025, 9, 20, 10, 15, 30));

        // 2 days, 13 hours, 44 minutes, 30 seconds before 2025-09-23T00:00Z
        assert_eq!(
            reading.left,
            TimeLeft {
                days: 2,
                hours: 13,
                minutes: 44,
                seconds: 30,
            }
        );
    }

    #[test]
    fn test_days_since_reference() {
        let countdown = Countdown::new(CountdownConfig::default());
        let reading = countdown.read(&at(2023, 12, 15, 9, 0, 0));
        assert_eq!(reading.days_since, 10);
    }

    #[test]
    fn test_past_target_goes_negative() {
        let countdown = Countdown::new(CountdownConfig::default());
        let reading = countdown.read(&at(2025, 9, 24, 1, 0, 0));
        assert_eq!(reading.left.days, -1);
        assert_eq!(reading.left.hours, -1);
        assert_eq!(reading.left.minutes, 0);
    }

    #[test]
    fn test_clock_and_title() {
        let countdown = Countdown::new(CountdownConfig::default());
        let reading = countdown.read(&at(2025, 9, 20, 15, 5, 0));
        assert_eq!(reading.clock, "03:05 PM");

        let title = countdown.title(&reading);
        assert!(title.starts_with("GTA VI in 02d 08h 55m 00s"));
        assert!(title.ends_with("03:05 PM"));
    }
}
