use actix_web::{http::header, web, HttpResponse, Responder};
use serde_json::json;

use super::store_error_response;
use crate::allotment::generate_plan_with_policy;
use crate::api_json::{PlanQuery, PlanRequest};
use crate::report::{filter_plan, plan_to_csv, room_names};
use crate::server::AppState;

pub const EXPORT_FILE_NAME: &str = "Exam_Seat_Allotment_Report.csv";

/// POST /plan
/// Body `{"seats_per_bench": 1|2, "swap_policy": "lookahead"|"scan"}`; both optional, an
/// empty body uses the configured defaults.
pub async fn generate_plan_handler(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let req: PlanRequest = if body.iter().all(u8::is_ascii_whitespace) {
        PlanRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(r) => r,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("invalid plan request: {}", e)})),
        }
    };
    let seats = req.seats_per_bench.unwrap_or(state.config.seats_per_bench);
    let policy = req.swap_policy.unwrap_or(state.config.swap_policy);

    let _guard = state.lock_writes();
    let students = match state.repo.load_students() {
        Ok(s) => s,
        Err(e) => return store_error_response("failed to load students", e),
    };
    let rooms = match state.repo.load_rooms() {
        Ok(r) => r,
        Err(e) => return store_error_response("failed to load rooms", e),
    };

    if students.is_empty() || rooms.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "data missing: add students and rooms before generating a plan",
            "students": students.len(),
            "rooms": rooms.len(),
        }));
    }

    let plan = match generate_plan_with_policy(&students, &rooms, seats, policy) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "plan rejected");
            return HttpResponse::UnprocessableEntity().json(json!({
                "error": e.to_string(),
                "total_students": e.total_students,
                "total_benches": e.total_benches,
                "total_capacity": e.total_capacity,
            }));
        }
    };

    if let Err(e) = state.repo.save_plan(&plan) {
        return store_error_response("failed to save plan", e);
    }

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "seats_per_bench": seats,
        "swap_policy": policy,
        "benches": plan.len(),
        "students": students.len(),
        "plan": plan,
    }))
}

/// GET /plan?usn=&room=
pub async fn view_plan_handler(state: web::Data<AppState>, query: web::Query<PlanQuery>) -> impl Responder {
    let plan = match state.repo.load_plan() {
        Ok(p) => p,
        Err(e) => return store_error_response("failed to load plan", e),
    };
    let q = query.into_inner();
    let rows = filter_plan(&plan, q.usn.as_deref(), q.room.as_deref());
    HttpResponse::Ok().json(json!({
        "generated": !plan.is_empty(),
        "rooms": room_names(&plan),
        "count": rows.len(),
        "plan": rows,
    }))
}

/// GET /plan/export
pub async fn export_plan_handler(state: web::Data<AppState>) -> impl Responder {
    let plan = match state.repo.load_plan() {
        Ok(p) => p,
        Err(e) => return store_error_response("failed to load plan", e),
    };
    if plan.is_empty() {
        return HttpResponse::NotFound().json(json!({"error": "no plan has been generated"}));
    }
    match plan_to_csv(&plan) {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .append_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME)))
            .body(text),
        Err(e) => store_error_response("failed to export plan", e),
    }
}

/// GET /plan/history
pub async fn plan_history_handler(state: web::Data<AppState>) -> impl Responder {
    match state.repo.plan_history() {
        Ok(runs) => HttpResponse::Ok().json(json!({"count": runs.len(), "runs": runs})),
        Err(e) => store_error_response("failed to load plan history", e),
    }
}
