use serde::{Deserialize, Serialize};

/// Lifecycle state of a meeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Done,
    Canceled,
}

/// Display metadata for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl MeetingStatus {
    pub const ALL: [Self; 3] = [Self::Scheduled, Self::Done, Self::Canceled];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }

    #[must_use]
    pub const fn display(self) -> StatusDisplay {
        match self {
            Self::Scheduled => StatusDisplay {
                label: "Scheduled",
                color: "yellow",
                icon: "Clock",
            },
            Self::Done => StatusDisplay {
                label: "Done",
                color: "green",
                icon: "CheckCircle2",
            },
            Self::Canceled => StatusDisplay {
                label: "Canceled",
                color: "red",
                icon: "XCircle",
            },
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MeetingStatus {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::error::CoreError::ParseError(format!("invalid status '{s}'")))
    }
}

/// Status criterion used by list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MeetingStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: MeetingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}
