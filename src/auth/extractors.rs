use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated user's id from request extensions.
///
/// `AuthMiddleware` verifies the bearer token and stores its `Claims` in the request
/// extensions; this extractor reads the subject back out. If no claims are present the
/// handler was mounted outside the protected scope and the request is rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub Uuid);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUserId(claims.sub))),
            None => {
                let err = AppError::Unauthorized("YOU ARE UNAUTHORIZED".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
