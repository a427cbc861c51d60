use crate::{
    auth::{credentials, LoginRequest, LoginResponse, PasswordHasher, RegisterRequest, TokenIssuer},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// ## Responses:
/// - `200 OK`: `{"message": "<email> created successfully"}`.
/// - `400 Bad Request`: Malformed JSON or missing fields.
/// - `409 Conflict`: `{"message": "Email already exists"}`.
/// - `422 Unprocessable Entity`: Invalid email format or empty password.
/// - `500 Internal Server Error`: Hashing or database failure.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    hasher: web::Data<PasswordHasher>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = credentials::register(&pool, &hasher, &register_data).await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("{} created successfully", user.email)
    })))
}

/// Login user
///
/// Checks the password and returns a bearer token valid for the configured lifetime.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Login successful", "token": "..."}`.
/// - `401 Unauthorized`: Wrong password.
/// - `404 Not Found`: No user with that email.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    hasher: web::Data<PasswordHasher>,
    tokens: web::Data<TokenIssuer>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user_id = credentials::login(&pool, &hasher, &login_data).await?;
    let token = tokens.issue(user_id)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".into(),
        token,
    }))
}
