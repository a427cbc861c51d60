use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{CatchRequest, CaughtCreature},
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub const RELEASE_NOT_FOUND_MESSAGE: &str = "Creature not found or not owned by user";

/// Records a catch for the authenticated user.
///
/// The creature row is created the first time anyone catches that name and reused
/// afterwards; every call adds a new caught record.
///
/// ## Request Body:
/// - `name`: The creature's catalog name (required, case-insensitive).
///
/// ## Responses:
/// - `200 OK`: `{"message": "Creature caught", "data": <caught record>}`.
/// - `400 Bad Request`: `name` missing, blank, or not a catalog identifier.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `500 Internal Server Error`: Database failure.
#[post("/catch")]
pub async fn catch_creature(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    catch_data: web::Json<CatchRequest>,
) -> Result<impl Responder, AppError> {
    let catch_data = catch_data.into_inner().normalized();
    catch_data
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let name = catch_data
        .name
        .ok_or_else(|| AppError::BadRequest("Creature name is required".into()))?;

    let caught = CaughtCreature::catch(&pool, user.0, &name).await?;
    log::info!("User {} caught {} ({})", user.0, name, caught.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Creature caught",
        "data": caught
    })))
}

/// Releases one of the authenticated user's catches.
///
/// ## Path Parameters:
/// - `id`: The UUID of the caught record.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Creature is released"}`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: No such record, or it belongs to someone else.
#[delete("/release/{id}")]
pub async fn release_creature(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
    record_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let released = CaughtCreature::release(&pool, user.0, record_id.into_inner()).await?;

    if !released {
        return Err(AppError::NotFound(RELEASE_NOT_FOUND_MESSAGE.into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Creature is released" })))
}

/// Lists the authenticated user's catches, newest first, with creature details.
///
/// ## Responses:
/// - `200 OK`: `{"data": [...]}`, or `{"message": "No creatures found."}` when empty.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `500 Internal Server Error`: Database failure.
#[get("/caught")]
pub async fn list_caught(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let caught = CaughtCreature::list_for_user(&pool, user.0).await?;

    if caught.is_empty() {
        return Ok(HttpResponse::Ok().json(json!({ "message": "No creatures found." })));
    }

    Ok(HttpResponse::Ok().json(json!({ "data": caught })))
}
