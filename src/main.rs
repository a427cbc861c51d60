use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use std::io;

use pokeden::{
    auth::{PasswordHasher, TokenIssuer},
    catalog::CatalogClient,
    config::Config,
    routes, MIGRATOR,
};

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let pool = web::Data::new(pool);
    let tokens = web::Data::new(TokenIssuer::new(
        &config.jwt_secret,
        Duration::minutes(config.token_ttl_minutes),
    ));
    let hasher = web::Data::new(PasswordHasher::new(config.bcrypt_cost));
    let catalog = web::Data::new(CatalogClient::new(config.catalog_base_url.clone()));

    log::info!(
        "Starting pokeden server at {} (catalog: {})",
        config.server_url(),
        catalog.base_url()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(tokens.clone())
            .app_data(hasher.clone())
            .app_data(catalog.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
