// Core data structures: students, rooms and the seating plan.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidSeatsPerBench;

/// Branch used when a student record arrives without one.
pub const DEFAULT_BRANCH: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StudentKind {
    #[default]
    Regular,
    Arrear,
}

impl StudentKind {
    /// Parses "Regular" / "Arrear" ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<StudentKind> {
        match s.trim().to_lowercase().as_str() {
            "regular" => Some(StudentKind::Regular),
            "arrear" => Some(StudentKind::Arrear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentKind::Regular => "Regular",
            StudentKind::Arrear => "Arrear",
        }
    }
}

impl fmt::Display for StudentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered candidate. `usn` is the university seat number and acts as the identifier;
/// `sem`, `kind` and `subjects` are carried through to reports but never read by the allotment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub usn: String,
    pub name: String,
    #[serde(default)]
    pub sem: Option<u8>,
    pub branch: String,
    #[serde(default)]
    pub kind: StudentKind,
    #[serde(default)]
    pub subjects: String,
}

impl Student {
    pub fn new(usn: impl Into<String>, name: impl Into<String>, branch: impl Into<String>) -> Self {
        Student {
            usn: usn.into(),
            name: name.into(),
            sem: None,
            branch: branch.into(),
            kind: StudentKind::Regular,
            subjects: String::new(),
        }
    }

    /// Branch key used for grouping; blank branches fall into `DEFAULT_BRANCH`.
    pub fn branch_key(&self) -> &str {
        let b = self.branch.trim();
        if b.is_empty() { DEFAULT_BRANCH } else { b }
    }
}

/// An examination hall. `benches` counts physical benches, not seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub benches: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, benches: u32) -> Self {
        Room { name: name.into(), benches }
    }
}

/// Seats per bench chosen for a run. Serialises as the integer 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SeatsPerBench {
    #[default]
    One,
    Two,
}

impl SeatsPerBench {
    pub fn get(self) -> usize {
        match self {
            SeatsPerBench::One => 1,
            SeatsPerBench::Two => 2,
        }
    }
}

impl TryFrom<u8> for SeatsPerBench {
    type Error = InvalidSeatsPerBench;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SeatsPerBench::One),
            2 => Ok(SeatsPerBench::Two),
            other => Err(InvalidSeatsPerBench(other)),
        }
    }
}

impl From<SeatsPerBench> for u8 {
    fn from(value: SeatsPerBench) -> u8 {
        value.get() as u8
    }
}

/// One occupied bench in the final plan.
///
/// `serial` is 1-based over the whole plan; `bench` is 1-based within `room`.
/// `seat2` is only ever filled for two-per-bench runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchAssignment {
    pub serial: usize,
    pub room: String,
    pub bench: u32,
    pub seat1: Student,
    pub seat2: Option<Student>,
}

impl BenchAssignment {
    /// Occupied seats in seat order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        std::iter::once(&self.seat1).chain(self.seat2.iter())
    }
}
