//! Column resolution for imported tables.
//!
//! Header cells are compared as lower-case alphanumerics against a list of aliases per column;
//! headers that match no alias exactly are retried with a normalised Damerau-Levenshtein score
//! (`strsim`) so typos such as "Brnach" or "Capcity" still land in the right column.

use std::collections::HashMap;
use std::hash::Hash;

use super::io::normalize_header;

/// Minimum similarity for a fuzzy header match.
pub const FUZZY_THRESHOLD: f64 = 0.8;

pub trait Column: Copy + Eq + Hash + 'static {
    const ALL: &'static [Self];
    fn aliases(self) -> &'static [&'static str];
    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentColumn {
    Usn,
    Name,
    Sem,
    Branch,
    Kind,
    Subjects,
}

impl Column for StudentColumn {
    const ALL: &'static [Self] = &[
        StudentColumn::Usn,
        StudentColumn::Name,
        StudentColumn::Sem,
        StudentColumn::Branch,
        StudentColumn::Kind,
        StudentColumn::Subjects,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            StudentColumn::Usn => &["usn", "rollno", "usnrollno", "registerno", "id"],
            StudentColumn::Name => &["name", "studentname"],
            StudentColumn::Sem => &["sem", "semester"],
            StudentColumn::Branch => &["branch", "department", "dept"],
            StudentColumn::Kind => &["type", "studenttype", "kind", "category"],
            StudentColumn::Subjects => &["subjects", "subject"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            StudentColumn::Usn => "USN",
            StudentColumn::Name => "Name",
            StudentColumn::Sem => "Sem",
            StudentColumn::Branch => "Branch",
            StudentColumn::Kind => "Type",
            StudentColumn::Subjects => "Subjects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomColumn {
    Name,
    Capacity,
}

impl Column for RoomColumn {
    const ALL: &'static [Self] = &[RoomColumn::Name, RoomColumn::Capacity];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            RoomColumn::Name => &["roomname", "name", "room", "hall", "hallname"],
            RoomColumn::Capacity => &["capacity", "benches", "benchcount", "seatingcapacity", "noofbenches"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            RoomColumn::Name => "Room Name",
            RoomColumn::Capacity => "Capacity",
        }
    }
}

fn header_key(s: &str) -> String {
    normalize_header(s).chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Maps each recognised column to its index in `header`. Exact alias matches are claimed
/// before fuzzy ones, and a header cell is never claimed twice.
pub fn resolve_columns<C: Column>(header: &[String]) -> HashMap<C, usize> {
    let keys: Vec<String> = header.iter().map(|h| header_key(h)).collect();
    let mut found: HashMap<C, usize> = HashMap::new();

    for &col in C::ALL {
        if let Some(i) = keys
            .iter()
            .enumerate()
            .find(|(i, k)| col.aliases().contains(&k.as_str()) && !found.values().any(|v| v == i))
            .map(|(i, _)| i)
        {
            found.insert(col, i);
        }
    }

    for &col in C::ALL {
        if found.contains_key(&col) {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (i, k) in keys.iter().enumerate() {
            if k.is_empty() || found.values().any(|v| *v == i) {
                continue;
            }
            let score = col
                .aliases()
                .iter()
                .map(|a| strsim::normalized_damerau_levenshtein(k, a))
                .fold(0.0_f64, f64::max);
            if score >= FUZZY_THRESHOLD && best.map_or(true, |(_, b)| score > b) {
                best = Some((i, score));
            }
        }
        if let Some((i, score)) = best {
            tracing::warn!(column = col.label(), header = %header[i], score, "fuzzy header match");
            found.insert(col, i);
        }
    }

    found
}

/// Labels of the `required` columns absent from `found`.
pub fn missing_columns<C: Column>(found: &HashMap<C, usize>, required: &[C]) -> Vec<String> {
    required
        .iter()
        .filter(|c| !found.contains_key(c))
        .map(|c| c.label().to_string())
        .collect()
}
