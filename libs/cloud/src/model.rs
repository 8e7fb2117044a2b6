//! Instance inventory model.
//!
//! A read-only view of what the provider reported at list time. Tag keys are
//! unique per instance and are converted into a typed mapping once, at the
//! provider boundary; downstream logic only touches the typed accessors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag keys that make up the wire contract.
pub const SCHEDULE_TAG: &str = "schedule";
pub const BACKUP_POLICY_TAG: &str = "backup_policy";
pub const NAME_TAG: &str = "Name";

/// Observed power state of an instance.
///
/// Anything that is neither running nor stopped (pending, stopping,
/// shutting-down, terminated, ...) maps to `Other` and is never acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Running,
    Stopped,
    Other(String),
}

impl PowerState {
    /// Map a provider state name onto the closed set we act on.
    pub fn from_provider(name: &str) -> Self {
        match name {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Tag set for an instance, keyed uniquely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    /// Build from key-value pairs. Later duplicates win, matching the
    /// provider's key-uniqueness guarantee.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Raw lookup by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The `schedule` tag: operating-hours window definition.
    pub fn schedule(&self) -> Option<&str> {
        self.get(SCHEDULE_TAG)
    }

    /// The `backup_policy` tag: snapshot cadence class.
    pub fn backup_policy(&self) -> Option<&str> {
        self.get(BACKUP_POLICY_TAG)
    }

    /// The optional `Name` display tag.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_TAG)
    }
}

/// An attached storage volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub volume_id: String,
}

/// One compute instance as reported by the inventory walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub instance_id: String,
    pub state: PowerState,
    pub tags: Tags,
    pub volumes: Vec<Volume>,
}

impl Instance {
    /// Display name: the `Name` tag if present, else the instance id.
    pub fn display_name(&self) -> &str {
        self.tags.name().unwrap_or(&self.instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state_mapping() {
        assert_eq!(PowerState::from_provider("running"), PowerState::Running);
        assert_eq!(PowerState::from_provider("stopped"), PowerState::Stopped);
        assert_eq!(
            PowerState::from_provider("pending"),
            PowerState::Other("pending".to_string())
        );
        assert_eq!(
            PowerState::from_provider("terminated"),
            PowerState::Other("terminated".to_string())
        );
    }

    #[test]
    fn test_typed_tag_accessors() {
        let tags = Tags::from_pairs([
            ("schedule", "start=0900;stop=1700;days=1-5"),
            ("backup_policy", "daily"),
            ("Name", "web1"),
            ("team", "platform"),
        ]);

        assert_eq!(tags.schedule(), Some("start=0900;stop=1700;days=1-5"));
        assert_eq!(tags.backup_policy(), Some("daily"));
        assert_eq!(tags.name(), Some("web1"));
        assert_eq!(tags.get("team"), Some("platform"));
        assert_eq!(tags.get("missing"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let named = Instance {
            instance_id: "i-123".to_string(),
            state: PowerState::Running,
            tags: Tags::from_pairs([("Name", "web1")]),
            volumes: vec![],
        };
        let unnamed = Instance {
            instance_id: "i-123".to_string(),
            state: PowerState::Running,
            tags: Tags::default(),
            volumes: vec![],
        };

        assert_eq!(named.display_name(), "web1");
        assert_eq!(unnamed.display_name(), "i-123");
    }
}
