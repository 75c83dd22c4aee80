use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::allotment::SwapPolicy;
use crate::api_json::PlanRequest;
use crate::models::SeatsPerBench;

/// GET /help
/// Lists the routes together with example request bodies.
pub async fn help_handler() -> impl Responder {
    let example_plan = PlanRequest { seats_per_bench: Some(SeatsPerBench::Two), swap_policy: Some(SwapPolicy::SingleLookahead) };
    HttpResponse::Ok().json(json!({
        "service": "hallseat",
        "routes": [
            {"method": "GET", "path": "/dashboard", "description": "student, room and bench totals plus plan status"},
            {"method": "GET", "path": "/students", "description": "current roster"},
            {"method": "POST", "path": "/students", "description": "add one student",
             "example": {"usn": "1RV21CS001", "name": "Asha Rao", "sem": 5, "branch": "CSE", "type": "Regular", "subjects": "Maths"}},
            {"method": "POST", "path": "/students/upload", "description": "replace the roster from a CSV/XLSX file (multipart); columns USN, Name, Sem, Branch, Type, Subjects"},
            {"method": "GET", "path": "/rooms", "description": "current rooms"},
            {"method": "POST", "path": "/rooms", "description": "add one room", "example": {"name": "A101", "capacity": 30}},
            {"method": "POST", "path": "/plan", "description": "generate and store a seating plan",
             "example": {"seats_per_bench": example_plan.seats_per_bench, "swap_policy": example_plan.swap_policy}},
            {"method": "GET", "path": "/plan", "description": "stored plan, filterable with ?usn= and ?room="},
            {"method": "GET", "path": "/plan/export", "description": "stored plan as a CSV attachment"},
            {"method": "GET", "path": "/plan/history", "description": "stored generation runs (sqlite store)"},
            {"method": "GET", "path": "/reports/summary", "description": "seated students per room and per branch"},
            {"method": "GET", "path": "/reports/hall", "description": "supervisor sheet for one room, ?room=&format=text|csv"},
        ]
    }))
}
