//! Integration tests for the stored-credential endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, VALID_KEY};
use serde_json::json;
use sqlx::PgPool;

const UNUSED_TRACKER: &str = "http://127.0.0.1:9";
const TELEGRAM_ID: i64 = 777;

#[sqlx::test(migrations = "../db/migrations")]
async fn get_keys_for_unknown_user_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool, UNUSED_TRACKER);
    let response = get(app, "/get_keys?telegram_id=777").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"keys": []}));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_key_with_empty_key_returns_400_before_any_call(pool: PgPool) {
    // The dead tracker URL proves no external call is attempted: reaching
    // it would fail the request with a 500, not a 400.
    let app = common::build_test_app(pool, UNUSED_TRACKER);
    let response = post_json(
        app,
        "/add_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"message": "API ключ не может быть пустым"})
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_key_with_empty_key_returns_400_error_body(pool: PgPool) {
    let app = common::build_test_app(pool, UNUSED_TRACKER);
    let response = post_json(
        app,
        "/delete_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "API ключ обязателен"})
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_key_with_invalid_credential_returns_401(pool: PgPool) {
    let tracker_url = common::spawn_mock_tracker().await;
    let app = common::build_test_app(pool, &tracker_url);

    let response = post_json(
        app,
        "/add_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": "wrong-key"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Неверный API ключ"})
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn add_list_delete_full_flow(pool: PgPool) {
    let tracker_url = common::spawn_mock_tracker().await;

    // Add: the key resolves to "tester" and is stored.
    let response = post_json(
        common::build_test_app(pool.clone(), &tracker_url),
        "/add_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": VALID_KEY}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"username": "tester"}));

    // Add again: duplicate pair is a conflict.
    let response = post_json(
        common::build_test_app(pool.clone(), &tracker_url),
        "/add_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": VALID_KEY}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Этот API ключ уже существует"})
    );

    // List: exactly one matching row.
    let response = get(
        common::build_test_app(pool.clone(), &tracker_url),
        &format!("/get_keys?telegram_id={TELEGRAM_ID}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"keys": [{"key": VALID_KEY, "name": "tester"}]})
    );

    // Another user does not see it.
    let response = get(
        common::build_test_app(pool.clone(), &tracker_url),
        "/get_keys?telegram_id=778",
    )
    .await;
    assert_eq!(body_json(response).await, json!({"keys": []}));

    // Delete: confirmation names the key.
    let response = post_json(
        common::build_test_app(pool.clone(), &tracker_url),
        "/delete_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": VALID_KEY}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": format!("API ключ {VALID_KEY} удален")})
    );

    // Delete again: the pair is gone.
    let response = post_json(
        common::build_test_app(pool.clone(), &tracker_url),
        "/delete_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": VALID_KEY}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "API ключ не найден"})
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_with_wrong_owner_returns_404_and_keeps_row(pool: PgPool) {
    let tracker_url = common::spawn_mock_tracker().await;

    let response = post_json(
        common::build_test_app(pool.clone(), &tracker_url),
        "/add_key",
        json!({"telegram_id": TELEGRAM_ID, "api_key": VALID_KEY}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Right key, wrong owner.
    let response = post_json(
        common::build_test_app(pool.clone(), &tracker_url),
        "/delete_key",
        json!({"telegram_id": 778, "api_key": VALID_KEY}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The original owner's row is untouched.
    let response = get(
        common::build_test_app(pool, &tracker_url),
        &format!("/get_keys?telegram_id={TELEGRAM_ID}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["keys"].as_array().unwrap().len(), 1);
}
