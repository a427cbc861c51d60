#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    get,
    http::StatusCode,
    rt, test, web, App, HttpResponse, HttpServer,
};
use chrono::Duration;
use dotenv::dotenv;
use pokeden::{auth::TokenIssuer, MIGRATOR};
use reqwest::Url;
use serde_json::json;
use sqlx::PgPool;
use std::net::TcpListener;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Builds the full application the way `main` does, with a cheap bcrypt cost.
macro_rules! test_app {
    ($pool:expr, $tokens:expr, $catalog:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data($tokens.clone())
                .app_data(actix_web::web::Data::new(
                    pokeden::auth::PasswordHasher::new(4),
                ))
                .app_data(actix_web::web::Data::new($catalog))
                .wrap(actix_web::middleware::Logger::default())
                .configure(pokeden::routes::config),
        )
        .await
    };
}

/// Connects to `DATABASE_URL` and applies migrations.
pub async fn test_pool() -> PgPool {
    dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn tokens() -> web::Data<TokenIssuer> {
    web::Data::new(TokenIssuer::new(TEST_SECRET, Duration::minutes(60)))
}

pub fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, Uuid::new_v4().simple())
}

pub fn unique_creature_name() -> String {
    format!("testmon-{}", Uuid::new_v4().simple())
}

pub async fn count_users_with_email(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}

pub async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

pub async fn cleanup_creature(pool: &PgPool, name: &str) {
    let _ = sqlx::query("DELETE FROM creatures WHERE name = $1")
        .bind(name)
        .execute(pool)
        .await;
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> (StatusCode, serde_json::Value) {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (
        status,
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    )
}

/// Registers and logs in, returning the bearer token.
pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> Result<String, String> {
    let (status, body) = register_user(app, email, password).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status, body
        ));
    }

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to log in. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let login: pokeden::auth::LoginResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse login response: {}", e))?;
    Ok(login.token)
}

#[get("/api/v2/pokemon/{name}")]
async fn fake_pokemon(name: web::Path<String>) -> HttpResponse {
    match name.as_str() {
        "pikachu" => HttpResponse::Ok().json(json!({ "id": 25, "name": "pikachu" })),
        "garbled" => HttpResponse::Ok()
            .content_type("application/json")
            .body("{not json"),
        "glitch" => HttpResponse::ServiceUnavailable().finish(),
        _ => HttpResponse::NotFound().body("Not Found"),
    }
}

/// A stand-in for the creature catalog running on an ephemeral local port.
pub struct FakeCatalog {
    pub base_url: Url,
    handle: actix_web::dev::ServerHandle,
}

impl FakeCatalog {
    pub fn start() -> FakeCatalog {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let server = HttpServer::new(|| App::new().service(fake_pokemon))
            .workers(1)
            .listen(listener)
            .expect("Failed to listen on fake catalog port")
            .run();
        let handle = server.handle();
        rt::spawn(server);

        FakeCatalog {
            base_url: Url::parse(&format!("http://127.0.0.1:{}/api/v2", port)).unwrap(),
            handle,
        }
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
