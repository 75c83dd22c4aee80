use std::fs::{self, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::io::read_csv_rows;
use super::records::{
    parse_rooms, parse_students, room_to_row, student_to_row, PlanRow, PLAN_HEADER, ROOM_HEADER,
    STUDENT_HEADER,
};
use super::SeatingRepository;
use crate::error::StoreError;
use crate::models::{BenchAssignment, Room, Student};

pub const STUDENT_FILE: &str = "students.csv";
pub const ROOM_FILE: &str = "rooms.csv";
pub const PLAN_FILE: &str = "plan.csv";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Flat-file store: one CSV per table inside a data directory.
/// Missing or zero-length files read as empty tables. Saves replace a whole file at once
/// (temp file + rename), so a concurrent reader sees the old table or the new one.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        CsvStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_rows(&self, file: &str) -> Result<Option<Vec<Vec<String>>>, StoreError> {
        let path = self.path(file);
        match fs::metadata(&path) {
            Ok(m) if m.len() > 0 => Ok(Some(read_csv_rows(fs::File::open(&path)?)?)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn buffer() -> csv::Writer<Vec<u8>> {
        csv::Writer::from_writer(Vec::new())
    }

    /// Swaps `file` for the buffered table via a sibling temp file.
    fn replace(&self, file: &str, wtr: csv::Writer<Vec<u8>>) -> Result<(), StoreError> {
        let bytes = wtr.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
        create_dir_all(&self.dir)?;
        let path = self.path(file);
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!(".{}.{}.{}.tmp", file, std::process::id(), seq));

        let written = fs::File::create(&tmp).and_then(|mut f| {
            f.write_all(&bytes)?;
            f.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &path)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl SeatingRepository for CsvStore {
    fn load_students(&self) -> Result<Vec<Student>, StoreError> {
        match self.read_rows(STUDENT_FILE)? {
            Some(rows) => parse_students(&rows, false),
            None => Ok(Vec::new()),
        }
    }

    fn save_students(&self, students: &[Student]) -> Result<(), StoreError> {
        let mut wtr = Self::buffer();
        wtr.write_record(STUDENT_HEADER)?;
        for s in students {
            wtr.write_record(student_to_row(s))?;
        }
        self.replace(STUDENT_FILE, wtr)?;
        tracing::debug!(count = students.len(), dir = %self.dir.display(), "students saved");
        Ok(())
    }

    fn load_rooms(&self) -> Result<Vec<Room>, StoreError> {
        match self.read_rows(ROOM_FILE)? {
            Some(rows) => parse_rooms(&rows),
            None => Ok(Vec::new()),
        }
    }

    fn save_rooms(&self, rooms: &[Room]) -> Result<(), StoreError> {
        let mut wtr = Self::buffer();
        wtr.write_record(ROOM_HEADER)?;
        for r in rooms {
            wtr.write_record(room_to_row(r))?;
        }
        self.replace(ROOM_FILE, wtr)
    }

    fn load_plan(&self) -> Result<Vec<BenchAssignment>, StoreError> {
        let path = self.path(PLAN_FILE);
        match fs::metadata(&path) {
            Ok(m) if m.len() > 0 => {}
            Ok(_) => return Ok(Vec::new()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(&path)?;
        let mut plan = Vec::new();
        for row in rdr.deserialize::<PlanRow>() {
            plan.push(BenchAssignment::from(row?));
        }
        Ok(plan)
    }

    fn save_plan(&self, plan: &[BenchAssignment]) -> Result<(), StoreError> {
        let mut wtr = Self::buffer();
        if plan.is_empty() {
            wtr.write_record(PLAN_HEADER)?;
        }
        for a in plan {
            wtr.serialize(PlanRow::from(a))?;
        }
        self.replace(PLAN_FILE, wtr)?;
        tracing::info!(benches = plan.len(), file = %self.path(PLAN_FILE).display(), "plan saved");
        Ok(())
    }
}
