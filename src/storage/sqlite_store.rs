use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::SeatingRepository;
use crate::error::StoreError;
use crate::models::{BenchAssignment, Room, Student, StudentKind};

/// One stored generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRun {
    pub id: i64,
    pub generated_at: DateTime<Utc>,
    pub benches: usize,
    pub students: usize,
}

/// SQLite-backed store. Keeps every generated plan; `load_plan` returns the latest one.
///
/// Connections are short-lived (opened per call) so the store can be shared across
/// server workers.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the schema exists.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let store = SqliteStore { path };
        store.init()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    fn init(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS students (
                position INTEGER PRIMARY KEY,
                usn TEXT NOT NULL,
                name TEXT NOT NULL,
                sem INTEGER,
                branch TEXT NOT NULL,
                kind TEXT NOT NULL,
                subjects TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS rooms (
                position INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                benches INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS plan_runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ts TEXT NOT NULL,
                benches INTEGER NOT NULL,
                students INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS plan_rows (
                run_id INTEGER NOT NULL REFERENCES plan_runs(id),
                serial INTEGER NOT NULL,
                room TEXT NOT NULL,
                bench INTEGER NOT NULL,
                seat1_json TEXT NOT NULL,
                seat2_json TEXT,
                PRIMARY KEY (run_id, serial)
            );",
        )?;
        Ok(())
    }
}

impl SeatingRepository for SqliteStore {
    fn plan_history(&self) -> Result<Vec<PlanRun>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, ts, benches, students FROM plan_runs ORDER BY id DESC")?;
        let rows = stmt.query_map([], |row| {
            Ok(PlanRun {
                id: row.get(0)?,
                generated_at: row.get(1)?,
                benches: row.get::<_, i64>(2)? as usize,
                students: row.get::<_, i64>(3)? as usize,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn load_students(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT usn, name, sem, branch, kind, subjects FROM students ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            let kind: String = row.get(4)?;
            Ok(Student {
                usn: row.get(0)?,
                name: row.get(1)?,
                sem: row.get(2)?,
                branch: row.get(3)?,
                kind: StudentKind::parse(&kind).unwrap_or_default(),
                subjects: row.get(5)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn save_students(&self, students: &[Student]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM students", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO students (position, usn, name, sem, branch, kind, subjects)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (i, s) in students.iter().enumerate() {
                stmt.execute(params![
                    i as i64,
                    s.usn,
                    s.name,
                    s.sem,
                    s.branch,
                    s.kind.as_str(),
                    s.subjects
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT name, benches FROM rooms ORDER BY position")?;
        let rows = stmt.query_map([], |row| Ok(Room { name: row.get(0)?, benches: row.get(1)? }))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn save_rooms(&self, rooms: &[Room]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM rooms", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO rooms (position, name, benches) VALUES (?1, ?2, ?3)")?;
            for (i, r) in rooms.iter().enumerate() {
                stmt.execute(params![i as i64, r.name, r.benches])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_plan(&self) -> Result<Vec<BenchAssignment>, StoreError> {
        let conn = self.connect()?;
        let latest: Option<i64> = conn
            .query_row("SELECT id FROM plan_runs ORDER BY id DESC LIMIT 1", [], |row| row.get(0))
            .optional()?;
        let Some(run_id) = latest else {
            return Ok(Vec::new());
        };

        let mut stmt = conn.prepare(
            "SELECT serial, room, bench, seat1_json, seat2_json FROM plan_rows
             WHERE run_id = ?1 ORDER BY serial",
        )?;
        let rows = stmt.query_map(params![run_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut plan = Vec::new();
        for r in rows {
            let (serial, room, bench, seat1, seat2) = r?;
            plan.push(BenchAssignment {
                serial: serial as usize,
                room,
                bench,
                seat1: serde_json::from_str(&seat1)?,
                seat2: seat2.as_deref().map(serde_json::from_str).transpose()?,
            });
        }
        Ok(plan)
    }

    fn save_plan(&self, plan: &[BenchAssignment]) -> Result<(), StoreError> {
        let students: usize = plan.iter().map(|a| a.students().count()).sum();
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO plan_runs (ts, benches, students) VALUES (?1, ?2, ?3)",
            params![Utc::now(), plan.len() as i64, students as i64],
        )?;
        let run_id = tx.last_insert_rowid();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO plan_rows (run_id, serial, room, bench, seat1_json, seat2_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for a in plan {
                let seat2 = a.seat2.as_ref().map(serde_json::to_string).transpose()?;
                stmt.execute(params![
                    run_id,
                    a.serial as i64,
                    a.room,
                    a.bench,
                    serde_json::to_string(&a.seat1)?,
                    seat2
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!(run_id, benches = plan.len(), students, "plan run stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/hallseat.db");
        let store = SqliteStore::open(&path).unwrap();
        assert!(store.path().exists());
        assert!(store.plan_history().unwrap().is_empty());
    }

    #[test]
    fn full_student_records_survive_a_plan_run() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(tmp.path().join("db.sqlite")).unwrap();
        let mut s = Student::new("1RV21CS001", "Asha", "CSE");
        s.sem = Some(5);
        s.kind = StudentKind::Arrear;
        s.subjects = "Math".into();
        let plan = vec![BenchAssignment { serial: 1, room: "R".into(), bench: 1, seat1: s.clone(), seat2: None }];
        store.save_plan(&plan).unwrap();
        assert_eq!(store.load_plan().unwrap(), plan);
    }
}
