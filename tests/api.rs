//! End-to-end tests for the cafe API router
//!
//! Each test drives the full axum router with in-memory requests, backed by
//! an in-memory SQLite database.

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cafe_api::{create_router, AppState, Database};

const API_KEY: &str = "test-key";

fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    create_router(AppState::new(db, API_KEY), 30)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

async fn post_form(app: &Router, uri: &str, form: &[(&str, &str)]) -> (StatusCode, Value) {
    let body = serde_urlencoded::to_string(form).unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn joes_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Joe's"),
        ("map_url", "https://maps.example.com/joes"),
        ("img_url", "https://img.example.com/joes.jpg"),
        ("location", "Downtown"),
        ("seats", "10-20"),
        ("has_wifi", "true"),
        ("has_toilet", "true"),
        ("sockets", "false"),
        ("can_take_calls", "false"),
        ("coffee_price", "£2.40"),
    ]
}

#[tokio::test]
async fn add_then_all_contains_submitted_record() {
    let app = app();

    let (status, body) = post_form(&app, "/add", &joes_form()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"response": {"success": "Successfully added the new cafe."}})
    );

    let (status, body) = get(&app, "/all").await;
    assert_eq!(status, StatusCode::OK);

    let cafes = body["cafe"].as_array().unwrap();
    assert_eq!(cafes.len(), 1);

    let cafe = &cafes[0];
    assert!(cafe["id"].as_i64().unwrap() > 0);
    assert_eq!(cafe["name"], "Joe's");
    assert_eq!(cafe["location"], "Downtown");
    assert_eq!(cafe["seats"], "10-20");
    assert_eq!(cafe["has_wifi"], true);
    assert_eq!(cafe["has_toilet"], true);
    // "false" is parsed as false, not presence-as-truthy
    assert_eq!(cafe["has_sockets"], false);
    assert_eq!(cafe["can_take_calls"], false);
    assert_eq!(cafe["coffee_price"], "£2.40");
}

#[tokio::test]
async fn added_ids_are_unique() {
    let app = app();

    let mut second = joes_form();
    second[0] = ("name", "Grind");
    post_form(&app, "/add", &joes_form()).await;
    post_form(&app, "/add", &second).await;

    let (_, body) = get(&app, "/all").await;
    let cafes = body["cafe"].as_array().unwrap();
    assert_eq!(cafes.len(), 2);
    assert_ne!(cafes[0]["id"], cafes[1]["id"]);
}

#[tokio::test]
async fn duplicate_name_is_conflict_and_not_created() {
    let app = app();

    post_form(&app, "/add", &joes_form()).await;
    let (status, body) = post_form(&app, "/add", &joes_form()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Joe's"));

    let (_, body) = get(&app, "/all").await;
    assert_eq!(body["cafe"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_rejects_missing_required_field() {
    let app = app();

    let form = vec![("name", "Grind"), ("location", "Soho")];
    let (status, _) = post_form(&app, "/add", &form).await;
    // Form decoding fails before the handler runs
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let form: Vec<(&str, &str)> = joes_form()
        .into_iter()
        .map(|(k, v)| if k == "seats" { (k, "") } else { (k, v) })
        .collect();
    let (status, body) = post_form(&app, "/add", &form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("seats"));
}

#[tokio::test]
async fn search_returns_exact_location_matches() {
    let app = app();

    post_form(&app, "/add", &joes_form()).await;
    let mut other = joes_form();
    other[0] = ("name", "Grind");
    other[3] = ("location", "downtown");
    post_form(&app, "/add", &other).await;

    let (status, body) = get(&app, "/search?loc=Downtown").await;
    assert_eq!(status, StatusCode::OK);

    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["cafe"]["name"], "Joe's");
}

#[tokio::test]
async fn search_with_no_matches_keeps_legacy_payload() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (status, body) = get(&app, "/search?loc=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": {"Not Found": "Sorry we don't have a cafe at that location"}})
    );
}

#[tokio::test]
async fn random_returns_a_cafe_and_guards_empty_table() {
    let app = app();

    let (status, body) = get(&app, "/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["Not Found"].is_string());

    post_form(&app, "/add", &joes_form()).await;

    let (status, body) = get(&app, "/random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cafe"]["name"], "Joe's");
}

#[tokio::test]
async fn update_price_changes_only_the_price() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (_, body) = get(&app, "/all").await;
    let before = body["cafe"][0].clone();
    let id = before["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::PUT, &format!("/update-price/{id}?new_price=%C2%A33.10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": "Successfully updated the price."}));

    let (_, body) = get(&app, "/all").await;
    let after = body["cafe"][0].clone();
    assert_eq!(after["coffee_price"], "£3.10");

    let mut expected = before;
    expected["coffee_price"] = json!("£3.10");
    assert_eq!(after, expected);
}

#[tokio::test]
async fn update_price_unknown_id_is_not_found() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (status, body) = send(&app, Method::PUT, "/update-price/9999?new_price=free").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": {"Not found": "Sorry a cafe with that id wasn't found in the database."}})
    );

    // No mutation happened
    let (_, body) = get(&app, "/all").await;
    assert_eq!(body["cafe"][0]["coffee_price"], "£2.40");
}

#[tokio::test]
async fn update_price_requires_new_price() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (status, _) = send(&app, Method::PUT, "/update-price/1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_closed_with_correct_key_deletes_permanently() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (_, body) = get(&app, "/all").await;
    let id = body["cafe"][0]["id"].as_i64().unwrap();

    let uri = format!("/report-closed/{id}?api_key={API_KEY}");
    let (status, body) = send(&app, Method::DELETE, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": "Successfully deleted the cafe."}));

    // Row is gone: listing is empty and a second lookup is not-found
    let (_, body) = get(&app, "/all").await;
    assert!(body["cafe"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, Method::DELETE, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn report_closed_with_wrong_key_is_forbidden_and_keeps_row() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (_, body) = get(&app, "/all").await;
    let id = body["cafe"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/report-closed/{id}?api_key=wrong"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({"error": "Sorry, that's not allowed. Make sure you have the correct api-key"})
    );

    // Missing key is rejected the same way
    let (status, _) = send(&app, Method::DELETE, &format!("/report-closed/{id}")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = get(&app, "/all").await;
    assert_eq!(body["cafe"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn report_closed_unknown_id_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/report-closed/42?api_key={API_KEY}"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": {"Not found": "Sorry a cafe with that id was not found in the database"}})
    );
}

#[tokio::test]
async fn legacy_get_verbs_still_work_for_mutations() {
    let app = app();
    post_form(&app, "/add", &joes_form()).await;

    let (status, _) = get(&app, "/update-price/1?new_price=%C2%A31.99").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/report-closed/1?api_key={API_KEY}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/all").await;
    assert!(body["cafe"].as_array().unwrap().is_empty());
}
