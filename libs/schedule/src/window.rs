//! The `schedule` tag micro-language and its evaluation.
//!
//! A schedule tag looks like `start=0900;stop=1700;days=1-5`: `;`-separated
//! `key=value` pairs with required keys `start`, `stop`, and `days`. Unknown
//! keys are ignored. Times are HHMM integers, days an inclusive ISO weekday
//! range.

use serde::{Deserialize, Serialize};

use crate::clock::Moment;
use crate::error::ScheduleError;

/// Time of day as the integer formed by concatenating the zero-padded hour
/// and minute fields: 09:50 reads as 950, 22:05 as 2205.
///
/// Comparison is plain integer comparison. Minutes never exceed 59 on a real
/// clock, so HHMM integer ordering agrees with minutes-since-midnight
/// ordering for every reading the evaluator will see.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HhMm(u16);

impl HhMm {
    /// Build from clock fields.
    pub fn from_clock(hour: u32, minute: u32) -> Self {
        Self((hour * 100 + minute) as u16)
    }

    /// The raw HHMM integer.
    pub fn value(self) -> u16 {
        self.0
    }

    fn parse(key: &'static str, value: &str) -> Result<Self, ScheduleError> {
        value
            .parse::<u16>()
            .map(Self)
            .map_err(|_| ScheduleError::InvalidTime {
                key,
                value: value.to_string(),
            })
    }
}

impl std::fmt::Display for HhMm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Inclusive weekday range, 1=Monday..7=Sunday, parsed from `"D0-D1"`.
///
/// The first day is assumed not to exceed the last; a range never wraps
/// across the week boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    first: u8,
    last: u8,
}

impl DayRange {
    pub fn new(first: u8, last: u8) -> Self {
        Self { first, last }
    }

    /// Whether the given ISO weekday falls inside the range.
    pub fn contains(&self, weekday: u8) -> bool {
        self.first <= weekday && weekday <= self.last
    }

    fn parse(value: &str) -> Result<Self, ScheduleError> {
        let malformed = || ScheduleError::InvalidDayRange(value.to_string());
        let (first, last) = value.split_once('-').ok_or_else(malformed)?;
        Ok(Self {
            first: first.parse().map_err(|_| malformed())?,
            last: last.parse().map_err(|_| malformed())?,
        })
    }
}

impl std::fmt::Display for DayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// The power state an instance should be in right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    Running,
    Stopped,
}

/// A parsed `schedule` tag: the operational window and its weekdays.
///
/// Constructed fresh from the tag string on every evaluation; never
/// persisted. `start != stop` is assumed but not enforced — equal endpoints
/// degenerate to an always-open window (see [`desired_state`]).
///
/// [`desired_state`]: OperatingWindow::desired_state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub start: HhMm,
    pub stop: HhMm,
    pub days: DayRange,
}

impl OperatingWindow {
    /// Parse a `schedule` tag value.
    ///
    /// Unknown keys are ignored, not rejected. A segment without exactly one
    /// `=`, a non-integer time, a malformed day range, or a missing required
    /// key is a [`ScheduleError`].
    pub fn parse(tag: &str) -> Result<Self, ScheduleError> {
        let mut start = None;
        let mut stop = None;
        let mut days = None;

        for segment in tag.split(';') {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ScheduleError::MalformedSegment(segment.to_string()))?;
            if value.contains('=') {
                return Err(ScheduleError::MalformedSegment(segment.to_string()));
            }
            match key {
                "start" => start = Some(HhMm::parse("start", value)?),
                "stop" => stop = Some(HhMm::parse("stop", value)?),
                "days" => days = Some(DayRange::parse(value)?),
                _ => {}
            }
        }

        Ok(Self {
            start: start.ok_or(ScheduleError::MissingKey("start"))?,
            stop: stop.ok_or(ScheduleError::MissingKey("stop"))?,
            days: days.ok_or(ScheduleError::MissingKey("days"))?,
        })
    }

    /// Evaluate the window against one clock reading.
    ///
    /// Returns `None` on an off-day: the instance is left alone regardless
    /// of the time, which is a distinct outcome from either desired state.
    ///
    /// Within an allowed day:
    /// - `start < stop`: a same-day window, half-open — the instance should
    ///   run iff `start <= now < stop`.
    /// - `start >= stop`: an overnight window crossing midnight — the
    ///   instance should run iff `now >= start || now < stop`. Equal
    ///   endpoints satisfy this for every reading, so `start == stop` means
    ///   always operational.
    pub fn desired_state(&self, at: &Moment) -> Option<DesiredState> {
        if !self.days.contains(at.weekday()) {
            return None;
        }

        let now = at.time();
        let operational = if self.start < self.stop {
            self.start <= now && now < self.stop
        } else {
            now >= self.start || now < self.stop
        };

        Some(if operational {
            DesiredState::Running
        } else {
            DesiredState::Stopped
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    /// A Moment on the given ISO weekday at the given clock time.
    /// Day 1 maps to 2026-01-05, a Monday.
    fn moment(weekday: u8, hour: u32, minute: u32) -> Moment {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 4 + weekday as u32, hour, minute, 0)
            .unwrap();
        let m = Moment::from_datetime(at);
        assert_eq!(m.weekday(), weekday);
        m
    }

    #[test]
    fn test_parse_full_tag() {
        let window = OperatingWindow::parse("start=0900;stop=1700;days=1-5").unwrap();
        assert_eq!(window.start, HhMm::from_clock(9, 0));
        assert_eq!(window.stop, HhMm::from_clock(17, 0));
        assert!(window.days.contains(1));
        assert!(window.days.contains(5));
        assert!(!window.days.contains(6));
    }

    #[test]
    fn test_parse_field_order_insignificant() {
        let a = OperatingWindow::parse("start=0900;stop=1700;days=1-5").unwrap();
        let b = OperatingWindow::parse("days=1-5;stop=1700;start=0900").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let window =
            OperatingWindow::parse("start=0800;stop=1800;days=1-7;owner=alice").unwrap();
        assert_eq!(window.start, HhMm::from_clock(8, 0));
    }

    #[rstest]
    #[case("start=0900;stop=1700")]
    #[case("stop=1700;days=1-5")]
    #[case("start=0900;days=1-5")]
    fn test_parse_missing_required_key(#[case] tag: &str) {
        assert!(matches!(
            OperatingWindow::parse(tag),
            Err(ScheduleError::MissingKey(_))
        ));
    }

    #[rstest]
    #[case("start=abc;stop=0600;days=1-7")]
    #[case("start=0900;stop=;days=1-7")]
    fn test_parse_bad_time(#[case] tag: &str) {
        assert!(matches!(
            OperatingWindow::parse(tag),
            Err(ScheduleError::InvalidTime { .. })
        ));
    }

    #[rstest]
    #[case("start=0900;stop=1700;days=15")]
    #[case("start=0900;stop=1700;days=one-five")]
    fn test_parse_bad_day_range(#[case] tag: &str) {
        assert!(matches!(
            OperatingWindow::parse(tag),
            Err(ScheduleError::InvalidDayRange(_))
        ));
    }

    #[rstest]
    #[case("start0900;stop=1700;days=1-5")]
    #[case("start=09=00;stop=1700;days=1-5")]
    fn test_parse_malformed_segment(#[case] tag: &str) {
        assert!(matches!(
            OperatingWindow::parse(tag),
            Err(ScheduleError::MalformedSegment(_))
        ));
    }

    // Same-day window: half-open, start inclusive, stop exclusive.
    #[rstest]
    #[case(9, 0, Some(DesiredState::Running))]
    #[case(16, 59, Some(DesiredState::Running))]
    #[case(17, 0, Some(DesiredState::Stopped))]
    #[case(8, 59, Some(DesiredState::Stopped))]
    #[case(23, 30, Some(DesiredState::Stopped))]
    fn test_same_day_window(
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: Option<DesiredState>,
    ) {
        let window = OperatingWindow::parse("start=0900;stop=1700;days=1-7").unwrap();
        assert_eq!(window.desired_state(&moment(3, hour, minute)), expected);
    }

    // Overnight window: operational after start or before stop.
    #[rstest]
    #[case(23, 0, Some(DesiredState::Running))]
    #[case(5, 0, Some(DesiredState::Running))]
    #[case(22, 0, Some(DesiredState::Running))]
    #[case(12, 0, Some(DesiredState::Stopped))]
    #[case(6, 0, Some(DesiredState::Stopped))]
    fn test_overnight_window(
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: Option<DesiredState>,
    ) {
        let window = OperatingWindow::parse("start=2200;stop=0600;days=1-7").unwrap();
        assert_eq!(window.desired_state(&moment(2, hour, minute)), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(9, 59)]
    #[case(10, 0)]
    #[case(23, 59)]
    fn test_equal_endpoints_always_operational(#[case] hour: u32, #[case] minute: u32) {
        // start == stop degenerates to the overnight branch and is satisfied
        // by every reading. Kept exactly as-is.
        let window = OperatingWindow::parse("start=1000;stop=1000;days=1-7").unwrap();
        assert_eq!(
            window.desired_state(&moment(4, hour, minute)),
            Some(DesiredState::Running)
        );
    }

    #[test]
    fn test_off_day_is_no_op() {
        let window = OperatingWindow::parse("start=0900;stop=1700;days=2-5").unwrap();
        // Sunday, mid-window by the clock: still no decision.
        assert_eq!(window.desired_state(&moment(7, 12, 0)), None);
        assert_eq!(window.desired_state(&moment(1, 12, 0)), None);
        assert_eq!(
            window.desired_state(&moment(2, 12, 0)),
            Some(DesiredState::Running)
        );
    }

    #[test]
    fn test_hhmm_ordering_matches_clock() {
        assert!(HhMm::from_clock(9, 59) < HhMm::from_clock(10, 0));
        assert!(HhMm::from_clock(0, 0) < HhMm::from_clock(23, 59));
        assert_eq!(HhMm::from_clock(9, 50).to_string(), "0950");
        assert_eq!(HhMm::from_clock(0, 5).to_string(), "0005");
    }
}
