pub use actix_session::Session;
pub use actix_web::http::header::ContentType;
pub use actix_web::{get, post, web, HttpRequest, HttpResponse};
pub use serde::{Deserialize, Serialize};

pub use portico_api::form::{FieldErrors, FormResponse};

pub use crate::action::{log_out, ActionOutcome};
pub use crate::http_types::*;
pub use crate::server_state::*;

pub fn cookie_str(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::COOKIE)?
        .to_str()
        .inspect_err(|e| {
            log::error!("Failed to convert cookie to str: {e}");
        })
        .ok()
}
