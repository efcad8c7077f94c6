//! Recurrence rules attached to a base meeting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repetition unit of a rule.
///
/// Unknown strings deserialize to `Unsupported`, which expands like `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Frequency {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Unsupported,
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Unsupported,
        }
    }
}

impl Frequency {
    /// Whether this frequency produces more than the base occurrence.
    #[must_use]
    pub const fn repeats(self) -> bool {
        matches!(self, Self::Daily | Self::Weekly | Self::Monthly | Self::Yearly)
    }
}

const fn default_interval() -> i32 {
    1
}

/// A repetition rule: every `interval` `frequency` units, bounded by `count`
/// instances and/or an inclusive `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    #[serde(default = "default_interval")]
    pub interval: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RecurrenceRule {
    #[must_use]
    pub const fn new(frequency: Frequency, interval: i32) -> Self {
        Self {
            frequency,
            interval,
            end_date: None,
            count: None,
        }
    }

    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub const fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Whether a meeting originates a series.
///
/// Serialized as `null` or the rule object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "Option<RecurrenceRule>",
    into = "Option<RecurrenceRule>"
)]
pub enum Recurrence {
    #[default]
    Single,
    Recurring(RecurrenceRule),
}

impl Recurrence {
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Single)
    }

    #[must_use]
    pub const fn rule(&self) -> Option<&RecurrenceRule> {
        match self {
            Self::Single => None,
            Self::Recurring(rule) => Some(rule),
        }
    }
}

impl From<Option<RecurrenceRule>> for Recurrence {
    fn from(value: Option<RecurrenceRule>) -> Self {
        value.map_or(Self::Single, Self::Recurring)
    }
}

impl From<Recurrence> for Option<RecurrenceRule> {
    fn from(value: Recurrence) -> Self {
        match value {
            Recurrence::Single => None,
            Recurrence::Recurring(rule) => Some(rule),
        }
    }
}
