use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde_json::json;

use super::store_error_response;
use crate::api_json::NewStudent;
use crate::server::AppState;
use crate::storage::{io, parse_students};

pub async fn list_students_handler(state: web::Data<AppState>) -> impl Responder {
    match state.repo.load_students() {
        Ok(students) => HttpResponse::Ok().json(json!({"count": students.len(), "students": students})),
        Err(e) => store_error_response("failed to load students", e),
    }
}

pub async fn add_student_handler(state: web::Data<AppState>, body: web::Json<NewStudent>) -> impl Responder {
    let student = match body.into_inner().into_student() {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e})),
    };

    let _guard = state.lock_writes();
    let usn = student.usn.clone();
    match state.repo.add_student(student) {
        Ok(count) => {
            tracing::info!(%usn, count, "student added");
            HttpResponse::Ok().json(json!({"status": "ok", "usn": usn, "count": count}))
        }
        Err(e) => store_error_response("failed to save student", e),
    }
}

/// POST /students/upload
/// Replaces the roster with the first CSV/XLSX file in the multipart body. All six
/// student columns must be present.
pub async fn upload_students_handler(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("multipart field error: {}", e)})),
        };
        let Some(filename) = field.content_disposition().get_filename().map(|s| s.to_string()) else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(b) => bytes.extend_from_slice(&b),
                Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("upload stream error: {}", e)})),
            }
        }
        if upload.is_none() {
            upload = Some((filename, bytes));
        }
    }

    let Some((filename, bytes)) = upload else {
        return HttpResponse::BadRequest().json(json!({"error": "no file in upload"}));
    };

    let students = match io::read_table_bytes(&filename, bytes).and_then(|rows| parse_students(&rows, true)) {
        Ok(s) => s,
        Err(e) => return store_error_response("failed to read upload", e),
    };

    let _guard = state.lock_writes();
    match state.repo.save_students(&students) {
        Ok(()) => {
            tracing::info!(file = %filename, count = students.len(), "student roster replaced");
            HttpResponse::Ok().json(json!({"status": "ok", "file": filename, "count": students.len()}))
        }
        Err(e) => store_error_response("failed to save students", e),
    }
}
