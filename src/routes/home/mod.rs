use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

/// Readiness message served on the root path
pub const READINESS_MESSAGE: &str = "Portfolio Contact Backend is running!";

/// Home handler
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(READINESS_MESSAGE)
}
