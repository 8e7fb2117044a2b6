//! A single UTC clock reading for one evaluation pass.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::window::HhMm;

/// One UTC clock reading, captured once at the start of a pass.
///
/// Every instance in a pass is evaluated against the same reading, so a slow
/// inventory walk cannot straddle a minute (or midnight) boundary halfway
/// through and flip decisions mid-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    time: HhMm,
    weekday: u8,
    at: DateTime<Utc>,
}

impl Moment {
    /// Capture the current UTC time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Build a reading from an explicit datetime.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            time: HhMm::from_clock(at.hour(), at.minute()),
            weekday: at.weekday().number_from_monday() as u8,
            at,
        }
    }

    /// Time of day as an HHMM integer.
    pub fn time(&self) -> HhMm {
        self.time
    }

    /// ISO weekday, 1=Monday..7=Sunday.
    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Human-readable timestamp for snapshot descriptions.
    pub fn timestamp(&self) -> String {
        self.at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_moment_from_datetime() {
        // 2026-01-05 is a Monday.
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 9, 50, 12).unwrap();
        let moment = Moment::from_datetime(at);

        assert_eq!(moment.time(), HhMm::from_clock(9, 50));
        assert_eq!(moment.weekday(), 1);
        assert_eq!(moment.timestamp(), "2026-01-05 09:50:12");
    }

    #[test]
    fn test_moment_sunday_is_seven() {
        let at = Utc.with_ymd_and_hms(2026, 1, 11, 23, 59, 0).unwrap();
        let moment = Moment::from_datetime(at);

        assert_eq!(moment.weekday(), 7);
        assert_eq!(moment.time(), HhMm::from_clock(23, 59));
    }
}
