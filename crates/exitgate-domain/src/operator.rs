//! Operator domain types.

use serde::{Deserialize, Serialize};

/// Role of a gate station account.
///
/// Wire format: `u8` (0 = Operator, 1 = Admin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorRole {
    Operator = 0,
    Admin = 1,
}

impl OperatorRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Operator),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this role may record exits at a gate.
    pub fn can_register_exits(self) -> bool {
        match self {
            Self::Operator | Self::Admin => true,
        }
    }

    /// Whether this role may change door state.
    pub fn can_manage_doors(self) -> bool {
        match self {
            Self::Admin => true,
            Self::Operator => false,
        }
    }
}
