use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::StoreError;

/// Text of one roster or room cell.
///
/// Whole numbers print without a fraction so numeric USNs, semesters and capacities read back
/// as typed. Booleans and error cells carry no roster value and read as blank, which the record
/// parser then reports against the row.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (*f as i64).to_string()
        }
        Data::Float(f) => f.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::Bool(_) | Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Lower-cases a header and drops whitespace, so "Room Name " and "roomname" compare equal.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Reads every CSV record (header included) as raw string rows.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<Vec<String>>, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        rows.push(rec.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

/// Reads the first worksheet of a spreadsheet on disk.
pub fn read_sheet_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, StoreError> {
    let workbook = open_workbook_auto(path)?;
    first_sheet_rows(workbook)
}

/// Same as `read_sheet_rows` for an uploaded workbook held in memory.
pub fn read_sheet_bytes(bytes: Vec<u8>) -> Result<Vec<Vec<String>>, StoreError> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    first_sheet_rows(workbook)
}

fn first_sheet_rows<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Vec<Vec<String>>, StoreError> {
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&first)?;
    Ok(range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect())
}

/// Tabular formats accepted for student and room imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    pub fn from_file_name(name: &str) -> Result<TableFormat, StoreError> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(TableFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
            _ => Err(StoreError::UnsupportedFile(name.to_string())),
        }
    }
}

/// Reads raw rows from an uploaded file, picking the parser from its name.
pub fn read_table_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Vec<Vec<String>>, StoreError> {
    match TableFormat::from_file_name(file_name)? {
        TableFormat::Csv => read_csv_rows(bytes.as_slice()),
        TableFormat::Spreadsheet => read_sheet_bytes(bytes),
    }
}

/// Reads raw rows from a file on disk, picking the parser from its extension.
pub fn read_table_file<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>, StoreError> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    match TableFormat::from_file_name(&name)? {
        TableFormat::Csv => read_csv_rows(std::fs::File::open(path)?),
        TableFormat::Spreadsheet => read_sheet_rows(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_drop_the_fraction() {
        assert_eq!(cell_to_string(&Data::Float(30.0)), "30");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::String("  CSE ".into())), "CSE");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Int(4)), "4");
    }

    #[test]
    fn flags_and_errors_are_blank() {
        assert_eq!(cell_to_string(&Data::Bool(true)), "");
        assert_eq!(cell_to_string(&Data::Error(calamine::CellErrorType::Div0)), "");
    }

    #[test]
    fn csv_rows_are_trimmed_and_flexible() {
        let rows = read_csv_rows("USN , Name\n1RV21CS001, Asha ,extra\n".as_bytes()).unwrap();
        assert_eq!(rows[0], vec!["USN", "Name"]);
        assert_eq!(rows[1], vec!["1RV21CS001", "Asha", "extra"]);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(TableFormat::from_file_name("students.CSV").unwrap(), TableFormat::Csv);
        assert_eq!(TableFormat::from_file_name("rooms.xlsx").unwrap(), TableFormat::Spreadsheet);
        assert!(matches!(
            TableFormat::from_file_name("notes.pdf"),
            Err(StoreError::UnsupportedFile(_))
        ));
    }
}
