//! Repositories and tabular import.
//!
//! The allotment never touches storage; handlers load students and rooms through a
//! `SeatingRepository`, run the pipeline, and hand the plan back to the repository.
//!
//! Submodules:
//! - `io`: raw row readers for CSV and spreadsheets
//! - `headers`: column resolution (aliases + fuzzy matching)
//! - `records`: typed records ⇄ rows, including the `plan.csv` layout
//! - `csv_store` / `sqlite_store`: the two repository backends

pub mod csv_store;
pub mod headers;
pub mod io;
pub mod records;
pub mod sqlite_store;

pub use csv_store::CsvStore;
pub use records::{parse_rooms, parse_students, plan_to_csv, PlanRow};
pub use sqlite_store::{PlanRun, SqliteStore};

use std::path::Path;

use crate::config::{Config, StoreKind};
use crate::error::StoreError;
use crate::models::{BenchAssignment, Room, Student};

pub trait SeatingRepository: Send + Sync {
    fn load_students(&self) -> Result<Vec<Student>, StoreError>;
    fn save_students(&self, students: &[Student]) -> Result<(), StoreError>;
    fn load_rooms(&self) -> Result<Vec<Room>, StoreError>;
    fn save_rooms(&self, rooms: &[Room]) -> Result<(), StoreError>;
    /// The most recently saved plan, or an empty list when none exists.
    fn load_plan(&self) -> Result<Vec<BenchAssignment>, StoreError>;
    fn save_plan(&self, plan: &[BenchAssignment]) -> Result<(), StoreError>;

    /// Stored generation runs, newest first. Stores that keep only the latest plan
    /// have no history.
    fn plan_history(&self) -> Result<Vec<PlanRun>, StoreError> {
        Ok(Vec::new())
    }

    /// Appends one student and returns the new roster size.
    fn add_student(&self, student: Student) -> Result<usize, StoreError> {
        let mut students = self.load_students()?;
        students.push(student);
        self.save_students(&students)?;
        Ok(students.len())
    }

    /// Appends one room and returns the new room count.
    fn add_room(&self, room: Room) -> Result<usize, StoreError> {
        let mut rooms = self.load_rooms()?;
        rooms.push(room);
        self.save_rooms(&rooms)?;
        Ok(rooms.len())
    }
}

/// Builds the repository selected by `config.store`.
pub fn open_repository(config: &Config) -> Result<Box<dyn SeatingRepository>, StoreError> {
    match config.store {
        StoreKind::Csv => {
            tracing::info!(dir = %config.data_dir.display(), "using csv store");
            Ok(Box::new(CsvStore::new(config.data_dir.clone())))
        }
        StoreKind::Sqlite => {
            tracing::info!(path = %config.db_path.display(), "using sqlite store");
            Ok(Box::new(SqliteStore::open(config.db_path.clone())?))
        }
    }
}

/// Reads a student roster from a CSV or spreadsheet file.
pub fn import_students<P: AsRef<Path>>(path: P, require_all: bool) -> Result<Vec<Student>, StoreError> {
    parse_students(&io::read_table_file(path)?, require_all)
}

/// Reads a room list from a CSV or spreadsheet file.
pub fn import_rooms<P: AsRef<Path>>(path: P) -> Result<Vec<Room>, StoreError> {
    parse_rooms(&io::read_table_file(path)?)
}
