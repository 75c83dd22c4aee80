use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::store_error_response;
use crate::api_json::NewRoom;
use crate::server::AppState;

pub async fn list_rooms_handler(state: web::Data<AppState>) -> impl Responder {
    match state.repo.load_rooms() {
        Ok(rooms) => {
            let total_benches: u64 = rooms.iter().map(|r| u64::from(r.benches)).sum();
            HttpResponse::Ok().json(json!({"count": rooms.len(), "total_benches": total_benches, "rooms": rooms}))
        }
        Err(e) => store_error_response("failed to load rooms", e),
    }
}

pub async fn add_room_handler(state: web::Data<AppState>, body: web::Json<NewRoom>) -> impl Responder {
    let room = match body.into_inner().into_room() {
        Ok(r) => r,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e})),
    };

    let _guard = state.lock_writes();
    let name = room.name.clone();
    match state.repo.add_room(room) {
        Ok(count) => {
            tracing::info!(room = %name, count, "room added");
            HttpResponse::Ok().json(json!({"status": "ok", "room": name, "count": count}))
        }
        Err(e) => store_error_response("failed to save room", e),
    }
}
