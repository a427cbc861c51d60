use crate::{catalog::CatalogClient, error::AppError, models::normalize_name};
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

/// Looks up a creature in the external catalog.
///
/// Public: no token required. The upstream payload is returned as-is under `data`.
///
/// ## Responses:
/// - `200 OK`: `{"data": <catalog JSON>}`.
/// - `404 Not Found`: The catalog has no creature by that name.
/// - `500 Internal Server Error`: Any other catalog failure.
#[get("/pokemon/{name}")]
pub async fn get_creature(
    catalog: web::Data<CatalogClient>,
    name: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let name = normalize_name(&name.into_inner());
    let data = catalog.fetch(&name).await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}
