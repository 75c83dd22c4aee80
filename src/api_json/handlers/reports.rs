use actix_web::{http::header, web, HttpResponse, Responder};
use serde_json::json;

use super::store_error_response;
use crate::api_json::HallQuery;
use crate::report::{branch_summary, dashboard, hall_report, room_summary};
use crate::server::AppState;

pub async fn dashboard_handler(state: web::Data<AppState>) -> impl Responder {
    let loaded = state
        .repo
        .load_students()
        .and_then(|s| Ok((s, state.repo.load_rooms()?, state.repo.load_plan()?)));
    match loaded {
        Ok((students, rooms, plan)) => HttpResponse::Ok().json(dashboard(&students, &rooms, &plan)),
        Err(e) => store_error_response("failed to load dashboard data", e),
    }
}

pub async fn summary_handler(state: web::Data<AppState>) -> impl Responder {
    match state.repo.load_plan() {
        Ok(plan) => HttpResponse::Ok().json(json!({
            "generated": !plan.is_empty(),
            "rooms": room_summary(&plan),
            "branches": branch_summary(&plan),
        })),
        Err(e) => store_error_response("failed to load plan", e),
    }
}

/// Attachment name for a room's sheet. Quotes, backslashes and control characters would
/// break the quoted `filename` parameter, so they become `_`.
pub(crate) fn hall_file_name(room: &str) -> String {
    let safe: String = room
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    format!("Hall_Report_{}.csv", safe)
}

/// GET /reports/hall?room=A101&format=text|csv
pub async fn hall_report_handler(state: web::Data<AppState>, query: web::Query<HallQuery>) -> impl Responder {
    let q = query.into_inner();
    let room = match q.room.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => return HttpResponse::BadRequest().json(json!({"error": "room query parameter is required"})),
    };
    let plan = match state.repo.load_plan() {
        Ok(p) => p,
        Err(e) => return store_error_response("failed to load plan", e),
    };

    let report = hall_report(&plan, &room);
    if report.rows.is_empty() {
        return HttpResponse::NotFound().json(json!({"error": format!("room '{}' has no seated students", room)}));
    }

    match q.format.as_deref().map(str::trim).unwrap_or("text") {
        "csv" => match report.to_csv() {
            Ok(text) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .append_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", hall_file_name(&room))))
                .body(text),
            Err(e) => store_error_response("failed to render hall report", e),
        },
        "text" | "" => HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(report.render_text()),
        other => HttpResponse::BadRequest().json(json!({"error": format!("unknown format '{}', expected text or csv", other)})),
    }
}
