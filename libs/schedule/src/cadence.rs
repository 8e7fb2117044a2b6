//! Backup cadence evaluation.
//!
//! The `backup_policy` tag is an opt-in: only the recognized cadence classes
//! ever trigger a snapshot, and anything else (including an empty value) is
//! a silent no-op, never an error.

use serde::{Deserialize, Serialize};

/// Recognized backup cadence classes.
///
/// Kept as a closed enum so a new cadence is a visible compile-time gap in
/// every `match`, rather than a silently ignored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupPolicy {
    /// Snapshot every day.
    Daily,
    /// Snapshot on Mondays.
    Weekly,
    /// Snapshot on Wednesdays.
    Midweekly,
}

impl BackupPolicy {
    /// Parse a `backup_policy` tag value. Unrecognized values map to `None`,
    /// the single place where the opt-in fallthrough happens.
    pub fn from_tag(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "midweekly" => Some(Self::Midweekly),
            _ => None,
        }
    }

    /// Whether a snapshot is due on the given ISO weekday (1=Monday..7=Sunday).
    pub fn due_on(self, weekday: u8) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekly => weekday == 1,
            Self::Midweekly => weekday == 3,
        }
    }

    /// Canonical tag value, used in snapshot names and tags.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Midweekly => "midweekly",
        }
    }
}

impl std::fmt::Display for BackupPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_daily_due_every_weekday() {
        for weekday in 1..=7 {
            assert!(BackupPolicy::Daily.due_on(weekday));
        }
    }

    #[rstest]
    #[case(BackupPolicy::Weekly, 1, true)]
    #[case(BackupPolicy::Weekly, 2, false)]
    #[case(BackupPolicy::Weekly, 7, false)]
    #[case(BackupPolicy::Midweekly, 3, true)]
    #[case(BackupPolicy::Midweekly, 1, false)]
    #[case(BackupPolicy::Midweekly, 4, false)]
    fn test_cadence_gate(
        #[case] policy: BackupPolicy,
        #[case] weekday: u8,
        #[case] due: bool,
    ) {
        assert_eq!(policy.due_on(weekday), due);
    }

    #[rstest]
    #[case("daily", Some(BackupPolicy::Daily))]
    #[case("weekly", Some(BackupPolicy::Weekly))]
    #[case("midweekly", Some(BackupPolicy::Midweekly))]
    #[case("monthly", None)]
    #[case("Daily", None)]
    #[case("", None)]
    fn test_from_tag(#[case] value: &str, #[case] expected: Option<BackupPolicy>) {
        assert_eq!(BackupPolicy::from_tag(value), expected);
    }

    #[test]
    fn test_tag_value_round_trip() {
        for policy in [
            BackupPolicy::Daily,
            BackupPolicy::Weekly,
            BackupPolicy::Midweekly,
        ] {
            assert_eq!(BackupPolicy::from_tag(policy.as_str()), Some(policy));
        }
    }
}
