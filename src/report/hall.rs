use serde::Serialize;
use std::fmt::Write as _;

use crate::error::StoreError;
use crate::models::BenchAssignment;

pub const HALL_REPORT_TITLE: &str = "EXAM HALL SEATING REPORT";
const SIGNATURE_LINE: &str = "Supervisor Signature: ____________________";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HallRow {
    pub bench: u32,
    pub usn: String,
    pub branch: String,
}

/// Supervisor sheet for one hall: one row per seated student, seat 1 before seat 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HallReport {
    pub room: String,
    pub rows: Vec<HallRow>,
}

pub fn hall_report(plan: &[BenchAssignment], room: &str) -> HallReport {
    let rows = plan
        .iter()
        .filter(|a| a.room == room)
        .flat_map(|a| {
            a.students().map(move |s| HallRow {
                bench: a.bench,
                usn: s.usn.trim().to_string(),
                branch: s.branch.trim().to_string(),
            })
        })
        .filter(|r| !r.usn.is_empty())
        .collect();
    HallReport { room: room.to_string(), rows }
}

impl HallReport {
    /// Fixed-width text version of the sheet, ready to print.
    pub fn render_text(&self) -> String {
        let usn_w = self.rows.iter().map(|r| r.usn.len()).max().unwrap_or(0).max(3);
        let branch_w = self.rows.iter().map(|r| r.branch.len()).max().unwrap_or(0).max(6);

        let mut out = String::new();
        let _ = writeln!(out, "{}", HALL_REPORT_TITLE);
        let _ = writeln!(out);
        let _ = writeln!(out, "Room Name: {}", self.room);
        let _ = writeln!(out);
        let _ = writeln!(out, "{:<8}  {:<usn_w$}  {:<branch_w$}", "Bench No", "USN", "Branch");
        let _ = writeln!(out, "{}", "-".repeat(8 + 2 + usn_w + 2 + branch_w));
        for r in &self.rows {
            let _ = writeln!(out, "{:<8}  {:<usn_w$}  {:<branch_w$}", r.bench, r.usn, r.branch);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", SIGNATURE_LINE);
        out
    }

    pub fn to_csv(&self) -> Result<String, StoreError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["Bench No", "USN", "Branch"])?;
        for r in &self.rows {
            wtr.write_record([r.bench.to_string().as_str(), r.usn.as_str(), r.branch.as_str()])?;
        }
        let bytes = wtr.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
