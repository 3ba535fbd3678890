//! Door domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operational state of a door. Exits are only recorded through `Open` doors.
/// New doors start closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorStatus {
    Open,
    #[default]
    Closed,
}

/// Unrecognised stored or submitted door status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown door status: {0}")]
pub struct UnknownDoorStatus(pub String);

impl DoorStatus {
    /// Storage and wire value (`"open"` / `"closed"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn is_open(self) -> bool {
        match self {
            Self::Open => true,
            Self::Closed => false,
        }
    }
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoorStatus {
    type Err = UnknownDoorStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(UnknownDoorStatus(other.to_owned())),
        }
    }
}
