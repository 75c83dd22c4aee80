pub mod docs;
pub mod plan;
pub mod reports;
pub mod rooms;
pub mod students;

pub use docs::*;
pub use plan::*;
pub use reports::*;
pub use rooms::*;
pub use students::*;

use actix_web::HttpResponse;
use serde_json::json;

use crate::error::StoreError;

/// Maps a repository error to a JSON error response. Bad input files are the
/// caller's fault (400); everything else is a server-side failure.
pub(crate) fn store_error_response(context: &str, e: StoreError) -> HttpResponse {
    match e {
        StoreError::MissingColumns { .. } | StoreError::InvalidRow { .. } | StoreError::UnsupportedFile(_) => {
            tracing::warn!(error = %e, "{}", context);
            HttpResponse::BadRequest().json(json!({"error": format!("{}: {}", context, e)}))
        }
        _ => {
            tracing::error!(error = %e, "{}", context);
            HttpResponse::InternalServerError().json(json!({"error": format!("{}: {}", context, e)}))
        }
    }
}
