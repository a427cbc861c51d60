pub mod auth;
pub mod caught;
pub mod creatures;
pub mod health;

use actix_web::{
    error::{JsonPayloadError, PathError},
    web, HttpRequest,
};

use crate::{auth::AuthMiddleware, error::AppError};

/// Mounts every endpoint. `/protected/*` sits behind `AuthMiddleware`; everything
/// else is public.
pub fn config(cfg: &mut web::ServiceConfig) {
    json_config(cfg);
    cfg.service(health::health)
        .service(auth::register)
        .service(auth::login)
        .service(creatures::get_creature)
        .service(
            web::scope("/protected")
                .wrap(AuthMiddleware)
                .app_data(web::PathConfig::default().error_handler(release_path_error_handler))
                .service(caught::catch_creature)
                .service(caught::release_creature)
                .service(caught::list_caught),
        );
}

/// Reports malformed JSON bodies as `AppError::BadRequest` so they share the
/// `{"message": ...}` error shape.
pub fn json_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

/// The only fallible path parameter under `/protected` is the record id of
/// `/release/{id}`; an id that is not a UUID cannot name an owned record.
fn release_path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected path parameter: {}", err);
    AppError::NotFound(caught::RELEASE_NOT_FOUND_MESSAGE.into()).into()
}
