#[macro_use]
mod common;

use actix_web::{http::header, http::StatusCode, test};
use pokeden::catalog::CatalogClient;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

fn unused_catalog() -> CatalogClient {
    CatalogClient::new("http://127.0.0.1:1/api/v2".parse().unwrap())
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[test_log::test(actix_rt::test)]
async fn test_catch_list_release_flow() {
    let pool = common::test_pool().await;
    let tokens = common::tokens();
    let app = test_app!(pool, tokens, unused_catalog());
    let email = common::unique_email("trainer");
    let name = common::unique_creature_name();

    let token = common::register_and_login(&app, &email, "pw")
        .await
        .expect("Failed to set up user");

    // Nothing caught yet
    let req = test::TestRequest::get()
        .uri("/protected/caught")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "No creatures found." }));

    // Catch the same creature twice
    let mut record_ids = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/protected/catch")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Creature caught");
        record_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }
    assert_ne!(record_ids[0], record_ids[1]);

    let creature_rows: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM creatures WHERE name = $1")
            .bind(&name)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(creature_rows, 1);

    // Both records are listed with the creature joined in
    let req = test::TestRequest::get()
        .uri("/protected/caught")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let caught = body["data"].as_array().expect("data should be an array");
    assert_eq!(caught.len(), 2);
    for record in caught {
        assert_eq!(record["creature"]["name"], name.as_str());
        assert_eq!(record["creature_id"], record["creature"]["id"]);
    }

    // Releasing an unknown id is a 404
    let req = test::TestRequest::delete()
        .uri(&format!("/protected/release/{}", Uuid::new_v4()))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Releasing an owned record succeeds
    let req = test::TestRequest::delete()
        .uri(&format!("/protected/release/{}", record_ids[0]))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Creature is released");

    let req = test::TestRequest::get()
        .uri("/protected/caught")
        .insert_header(bearer(&token))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let caught = body["data"].as_array().expect("data should be an array");
    assert_eq!(caught.len(), 1);
    assert_eq!(caught[0]["id"], record_ids[1].as_str());

    common::cleanup_user(&pool, &email).await;
    common::cleanup_creature(&pool, &name).await;
}

#[test_log::test(actix_rt::test)]
async fn test_release_is_scoped_to_owner() {
    let pool = common::test_pool().await;
    let tokens = common::tokens();
    let app = test_app!(pool, tokens, unused_catalog());
    let owner_email = common::unique_email("owner");
    let thief_email = common::unique_email("thief");
    let name = common::unique_creature_name();

    let owner = common::register_and_login(&app, &owner_email, "pw")
        .await
        .expect("Failed to set up owner");
    let thief = common::register_and_login(&app, &thief_email, "pw")
        .await
        .expect("Failed to set up thief");

    let req = test::TestRequest::post()
        .uri("/protected/catch")
        .insert_header(bearer(&owner))
        .set_json(json!({ "name": name }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let record_id = body["data"]["id"].as_str().unwrap().to_string();

    // Another user cannot release it...
    let req = test::TestRequest::delete()
        .uri(&format!("/protected/release/{}", record_id))
        .insert_header(bearer(&thief))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ...does not see it...
    let req = test::TestRequest::get()
        .uri("/protected/caught")
        .insert_header(bearer(&thief))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "message": "No creatures found." }));

    // ...and the owner's record is intact.
    let req = test::TestRequest::get()
        .uri("/protected/caught")
        .insert_header(bearer(&owner))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], record_id.as_str());

    common::cleanup_user(&pool, &owner_email).await;
    common::cleanup_user(&pool, &thief_email).await;
    common::cleanup_creature(&pool, &name).await;
}
