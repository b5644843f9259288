use crate::handlers::prelude::*;

#[get("/health_check")]
pub async fn get_health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
