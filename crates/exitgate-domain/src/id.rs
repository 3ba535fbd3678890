//! Newtype wrappers for domain identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of an externally assigned student identifier (enrollment card number).
pub const STUDENT_ID_MAX_LEN: usize = 10;

/// Rejected student identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStudentId {
    #[error("student id is empty")]
    Empty,
    #[error("student id is longer than 10 characters")]
    TooLong,
}

/// Identifies a student. Assigned by the school, never generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    /// Validate a raw identifier: non-blank and at most [`STUDENT_ID_MAX_LEN`] characters.
    /// Surrounding whitespace is not part of the identifier.
    pub fn parse(raw: &str) -> Result<Self, InvalidStudentId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidStudentId::Empty);
        }
        if trimmed.chars().count() > STUDENT_ID_MAX_LEN {
            return Err(InvalidStudentId::TooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = InvalidStudentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StudentId {
    type Error = InvalidStudentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StudentId> for String {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

/// Identifies a monitored door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(pub i32);

impl fmt::Display for DoorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DoorId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i32> for DoorId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Identifies a gate operator account (owned by the auth collaborator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub Uuid);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OperatorId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Uuid> for OperatorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Identifies an exit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitLogId(pub Uuid);

impl ExitLogId {
    /// Time-ordered id for a new entry.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ExitLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExitLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ExitLogId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
