use actix_cors::Cors;
use actix_web::http::header;

/// Cross-origin policy applied in front of the router.
///
/// Only `allowed_origin` may call the API from a browser. Preflight requests
/// are answered here and never reach the handlers, and requests from any
/// other origin are refused before routing.
pub fn cors_policy(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .block_on_origin_mismatch(true)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}
