use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::{Mutex, MutexGuard};

use crate::api_json::handlers::*;
use crate::config::Config;
use crate::storage::{open_repository, SeatingRepository};

/// Shared by every worker. Holds no session data: handlers read the current
/// students, rooms and plan from the repository on each request.
pub struct AppState {
    pub repo: Box<dyn SeatingRepository>,
    pub config: Config,
    write_lock: Mutex<()>,
}

impl AppState {
    pub fn new(repo: Box<dyn SeatingRepository>, config: Config) -> Self {
        AppState { repo, config, write_lock: Mutex::new(()) }
    }

    /// Serialises load-modify-save sequences against the repository.
    pub(crate) fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Registers every route; shared by `run_server` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard_handler))
        .route("/students", web::get().to(list_students_handler))
        .route("/students", web::post().to(add_student_handler))
        .route("/students/upload", web::post().to(upload_students_handler))
        .route("/rooms", web::get().to(list_rooms_handler))
        .route("/rooms", web::post().to(add_room_handler))
        .route("/plan", web::post().to(generate_plan_handler))
        .route("/plan", web::get().to(view_plan_handler))
        .route("/plan/export", web::get().to(export_plan_handler))
        .route("/plan/history", web::get().to(plan_history_handler))
        .route("/reports/summary", web::get().to(summary_handler))
        .route("/reports/hall", web::get().to(hall_report_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let repo = open_repository(&config).map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind = config.bind.clone();
    let state = web::Data::new(AppState::new(repo, config));

    tracing::info!(%bind, "starting server");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
