use actix_web::{web, HttpResponse};

use crate::{
    models::UserPayload,
    services::UserStore,
    utils::error::AppError,
};

/// Ids that are not integers cannot exist in the table.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::NotFound)
}

fn decode_payload(body: &[u8]) -> Result<UserPayload, AppError> {
    Ok(serde_json::from_slice(body)?)
}

/// GET /users - List all users
pub async fn list_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    let users = store
        .list_all()
        .await
        .map_err(AppError::from_store("Unable to fetch users"))?;

    log::debug!("📋 Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id} - Fetch one user
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    let user = store
        .get_by_id(id)
        .await
        .map_err(AppError::from_store("Unable to fetch user"))?;

    Ok(HttpResponse::Ok().json(user))
}

/// POST /users - Create a user; the store assigns the id
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let payload = decode_payload(&body)?;

    let user = store
        .insert(payload)
        .await
        .map_err(AppError::from_store("Unable to create user"))?;

    log::info!("✅ User created: {}", user.id);
    Ok(HttpResponse::Created().json(user))
}

/// PUT /users/{id} - Replace a user
///
/// The record must exist before the body is decoded. Fields missing from
/// the body are reset, not kept.
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    let mut user = store
        .get_by_id(id)
        .await
        .map_err(AppError::from_store("Unable to fetch user"))?;

    decode_payload(&body)?.apply_to(&mut user);

    let updated = store
        .replace(&user)
        .await
        .map_err(AppError::from_store("Unable to update user"))?;

    log::info!("✏️ User updated: {}", updated.id);
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /users/{id} - Hard delete
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;

    store
        .delete_by_id(id)
        .await
        .map_err(AppError::from_store("Unable to delete user"))?;

    log::info!("🗑️ User deleted: {}", id);
    Ok(HttpResponse::Ok().json("User deleted"))
}

/// OPTIONS /users - Plain preflight support
pub async fn options_users() -> HttpResponse {
    log::info!("Handling OPTIONS request");
    HttpResponse::Ok().finish()
}
