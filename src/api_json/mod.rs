// Request bodies accepted by the JSON API and their conversion into typed records.
pub mod handlers;

use serde::Deserialize;

use crate::allotment::SwapPolicy;
use crate::models::{Room, SeatsPerBench, Student, StudentKind};

/// Body of `POST /plan`. Missing fields fall back to the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub seats_per_bench: Option<SeatsPerBench>,
    #[serde(default)]
    pub swap_policy: Option<SwapPolicy>,
}

/// Body of `POST /students` (manual entry).
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub usn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sem: Option<u8>,
    #[serde(default)]
    pub branch: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub subjects: String,
}

impl NewStudent {
    /// Validates the entry and normalises it: USN upper-cased, name title-cased.
    pub fn into_student(self) -> Result<Student, String> {
        let usn = self.usn.trim().to_uppercase();
        let name = title_case(&self.name);
        if usn.is_empty() || name.is_empty() {
            return Err("USN and name are required".to_string());
        }
        let kind = match self.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            Some(k) => StudentKind::parse(k).ok_or_else(|| format!("unknown student type '{}'", k))?,
            None => StudentKind::default(),
        };
        Ok(Student {
            usn,
            name,
            sem: self.sem,
            branch: self.branch.trim().to_string(),
            kind,
            subjects: self.subjects.trim().to_string(),
        })
    }
}

/// Body of `POST /rooms`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: i64,
}

impl NewRoom {
    pub fn into_room(self) -> Result<Room, String> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("room name is required".to_string());
        }
        match u32::try_from(self.capacity) {
            Ok(benches) if benches >= 1 => Ok(Room { name, benches }),
            _ => Err(format!("capacity must be a whole number >= 1, got {}", self.capacity)),
        }
    }
}

/// Query string of `GET /plan`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanQuery {
    pub usn: Option<String>,
    pub room: Option<String>,
}

/// Query string of `GET /reports/hall`.
#[derive(Debug, Clone, Deserialize)]
pub struct HallQuery {
    pub room: Option<String>,
    pub format: Option<String>,
}

/// "aSHA  rao" -> "Asha Rao"
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
