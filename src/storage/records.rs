//! Row-level conversion between raw tables and typed records.
//!
//! Tables are validated once here; everything past this point works on `Student`, `Room` and
//! `BenchAssignment` values only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::headers::{missing_columns, resolve_columns, Column, RoomColumn, StudentColumn};
use crate::error::StoreError;
use crate::models::{BenchAssignment, Room, Student, StudentKind};

/// Placeholder written for an empty second seat.
pub const EMPTY_SEAT: &str = "-";

pub const STUDENT_HEADER: [&str; 6] = ["USN", "Name", "Sem", "Branch", "Type", "Subjects"];
pub const ROOM_HEADER: [&str; 2] = ["Room Name", "Capacity"];

/// Columns a roster must carry; `require_all` (bulk upload) demands every student column.
fn required_student_columns(require_all: bool) -> &'static [StudentColumn] {
    if require_all {
        StudentColumn::ALL
    } else {
        &[StudentColumn::Usn, StudentColumn::Name, StudentColumn::Branch]
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

fn cell<'a, C: Column>(row: &'a [String], cols: &HashMap<C, usize>, col: C) -> &'a str {
    cols.get(&col)
        .and_then(|&i| row.get(i))
        .map(|s| s.trim())
        .unwrap_or("")
}

/// Parses a student table whose first row is the header.
pub fn parse_students(rows: &[Vec<String>], require_all: bool) -> Result<Vec<Student>, StoreError> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let cols = resolve_columns::<StudentColumn>(header);
    let missing = missing_columns(&cols, required_student_columns(require_all));
    if !missing.is_empty() {
        return Err(StoreError::MissingColumns { table: "students", missing });
    }

    let mut out = Vec::with_capacity(body.len());
    for (i, row) in body.iter().enumerate() {
        let line = i + 2;
        if is_blank_row(row) {
            continue;
        }
        let usn = cell(row, &cols, StudentColumn::Usn);
        let name = cell(row, &cols, StudentColumn::Name);
        if usn.is_empty() || name.is_empty() {
            return Err(StoreError::InvalidRow { line, reason: "USN and Name are required".into() });
        }

        let sem_raw = cell(row, &cols, StudentColumn::Sem);
        let sem = parse_whole::<u8>(sem_raw);
        if sem.is_none() && !sem_raw.is_empty() {
            tracing::warn!(line, sem = sem_raw, "ignoring unreadable semester");
        }

        let kind_raw = cell(row, &cols, StudentColumn::Kind);
        let kind = StudentKind::parse(kind_raw).unwrap_or_else(|| {
            if !kind_raw.is_empty() {
                tracing::warn!(line, kind = kind_raw, "unknown student type, using Regular");
            }
            StudentKind::default()
        });

        out.push(Student {
            usn: usn.to_string(),
            name: name.to_string(),
            sem,
            branch: cell(row, &cols, StudentColumn::Branch).to_string(),
            kind,
            subjects: cell(row, &cols, StudentColumn::Subjects).to_string(),
        });
    }
    Ok(out)
}

/// Parses a room table whose first row is the header. Capacity must be a whole number ≥ 1.
pub fn parse_rooms(rows: &[Vec<String>]) -> Result<Vec<Room>, StoreError> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let cols = resolve_columns::<RoomColumn>(header);
    let missing = missing_columns(&cols, RoomColumn::ALL);
    if !missing.is_empty() {
        return Err(StoreError::MissingColumns { table: "rooms", missing });
    }

    let mut out = Vec::with_capacity(body.len());
    for (i, row) in body.iter().enumerate() {
        let line = i + 2;
        if is_blank_row(row) {
            continue;
        }
        let name = cell(row, &cols, RoomColumn::Name);
        if name.is_empty() {
            return Err(StoreError::InvalidRow { line, reason: "room name is required".into() });
        }
        let raw = cell(row, &cols, RoomColumn::Capacity);
        let benches = match parse_whole::<u32>(raw) {
            Some(n) if n >= 1 => n,
            _ => {
                return Err(StoreError::InvalidRow {
                    line,
                    reason: format!("capacity of '{}' must be a whole number >= 1, got '{}'", name, raw),
                })
            }
        };
        out.push(Room::new(name, benches));
    }
    Ok(out)
}

/// Accepts "30" as well as spreadsheet-style "30.0".
fn parse_whole<T: TryFrom<i64> + std::str::FromStr>(s: &str) -> Option<T> {
    let s = s.trim();
    if let Ok(v) = s.parse::<T>() {
        return Some(v);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() != 0.0 || !f.is_finite() {
        return None;
    }
    T::try_from(f as i64).ok()
}

pub fn student_to_row(s: &Student) -> [String; 6] {
    [
        s.usn.clone(),
        s.name.clone(),
        s.sem.map(|v| v.to_string()).unwrap_or_default(),
        s.branch.clone(),
        s.kind.to_string(),
        s.subjects.clone(),
    ]
}

pub fn room_to_row(r: &Room) -> [String; 2] {
    [r.name.clone(), r.benches.to_string()]
}

/// Flat `plan.csv` record, one per bench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRow {
    #[serde(rename = "S.No")]
    pub serial: usize,
    #[serde(rename = "Room")]
    pub room: String,
    #[serde(rename = "Bench")]
    pub bench: u32,
    #[serde(rename = "Student 1 USN")]
    pub student1_usn: String,
    #[serde(rename = "Student 1 Name")]
    pub student1_name: String,
    #[serde(rename = "Student 1 Branch")]
    pub student1_branch: String,
    #[serde(rename = "Student 2 USN")]
    pub student2_usn: String,
    #[serde(rename = "Student 2 Name")]
    pub student2_name: String,
    #[serde(rename = "Student 2 Branch")]
    pub student2_branch: String,
}

impl From<&BenchAssignment> for PlanRow {
    fn from(a: &BenchAssignment) -> Self {
        let (u2, n2, b2) = match &a.seat2 {
            Some(s) => (s.usn.clone(), s.name.clone(), s.branch.clone()),
            None => (EMPTY_SEAT.to_string(), EMPTY_SEAT.to_string(), EMPTY_SEAT.to_string()),
        };
        PlanRow {
            serial: a.serial,
            room: a.room.clone(),
            bench: a.bench,
            student1_usn: a.seat1.usn.clone(),
            student1_name: a.seat1.name.clone(),
            student1_branch: a.seat1.branch.clone(),
            student2_usn: u2,
            student2_name: n2,
            student2_branch: b2,
        }
    }
}

impl From<PlanRow> for BenchAssignment {
    fn from(r: PlanRow) -> Self {
        let seat2 = match r.student2_usn.trim() {
            "" | EMPTY_SEAT => None,
            usn => Some(Student::new(usn, r.student2_name, r.student2_branch)),
        };
        BenchAssignment {
            serial: r.serial,
            room: r.room,
            bench: r.bench,
            seat1: Student::new(r.student1_usn, r.student1_name, r.student1_branch),
            seat2,
        }
    }
}

/// Serialises the plan in the `plan.csv` layout.
pub fn plan_to_csv(plan: &[BenchAssignment]) -> Result<String, StoreError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if plan.is_empty() {
        wtr.write_record(PLAN_HEADER)?;
    }
    for a in plan {
        wtr.serialize(PlanRow::from(a))?;
    }
    let bytes = wtr.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub const PLAN_HEADER: [&str; 9] = [
    "S.No",
    "Room",
    "Bench",
    "Student 1 USN",
    "Student 1 Name",
    "Student 1 Branch",
    "Student 2 USN",
    "Student 2 Name",
    "Student 2 Branch",
];
