pub mod users;

use actix_web::web;

/// Registers the `/users` routes. Anything else falls through to the
/// default 404.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(users::list_users))
            .route(web::post().to(users::create_user))
            .route(web::method(actix_web::http::Method::OPTIONS).to(users::options_users)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );
}
