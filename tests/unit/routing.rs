// Tests covering route dispatch and status mapping of the user API, driven in-process.
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_case::test_case;
use tower::ServiceExt;

async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header("content-type", "application/json");
    }
    let request = request
        .body(body.map(|raw| Body::from(raw.to_string())).unwrap_or_else(Body::empty))
        .expect("valid request");

    let response = router.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body readable")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(router: &Router, name: &str, age: u32) -> u64 {
    let body = json!({ "name": name, "age": age, "friends": [] }).to_string();
    let (status, value) = send(router, Method::POST, "/create", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    value["userID"].as_u64().expect("numeric id")
}

#[tokio::test]
async fn health_reports_ok() {
    let (_, router) = amity::router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_stores_the_user() {
    let (store, router) = amity::router();
    let id = create(&router, "Alice", 30).await;

    let user = store.find_by_id(amity::UserId::new(id)).expect("user stored");
    assert_eq!(user.name, "Alice");
    assert_eq!(user.age, 30);
}

#[test_case("/create", Method::POST, "{not json" ; "create with broken json")]
#[test_case("/create", Method::POST, r#"{"age":30}"# ; "create without name")]
#[test_case("/create", Method::POST, r#"{"name":"a","age":"thirty"}"# ; "create with textual age")]
#[test_case("/create", Method::POST, r#"{"name":"a","age":-1}"# ; "create with negative age")]
#[test_case("/make_friends", Method::POST, r#"{"source_id":1}"# ; "make friends without target")]
#[test_case("/delete", Method::DELETE, r#"{}"# ; "delete without target")]
#[test_case("/1", Method::PUT, r#"{"years":3}"# ; "update without age")]
#[tokio::test]
async fn malformed_bodies_are_rejected(uri: &str, method: Method, body: &str) {
    let (store, router) = amity::router();
    store.add(amity::NewUser::new("seed", 1));

    let (status, value) = send(&router, method, uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["code"], "invalid_request");
}

#[test_case(Method::GET, "/friends/abc", None ; "friends with textual id")]
#[test_case(Method::PUT, "/abc", Some(r#"{"age":3}"#) ; "update with textual id")]
#[tokio::test]
async fn non_numeric_ids_are_rejected(method: Method, uri: &str, body: Option<&str>) {
    let (_, router) = amity::router();
    let (status, value) = send(&router, method, uri, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["code"], "invalid_request");
}

#[test_case(Method::POST, "/make_friends", Some(r#"{"source_id":77,"target_id":1}"#) ; "make friends")]
#[test_case(Method::DELETE, "/delete", Some(r#"{"target_id":77}"#) ; "delete")]
#[test_case(Method::GET, "/friends/77", None ; "list friends")]
#[test_case(Method::PUT, "/77", Some(r#"{"age":40}"#) ; "update age")]
#[tokio::test]
async fn unknown_ids_are_not_found(method: Method, uri: &str, body: Option<&str>) {
    let (_, router) = amity::router();
    let (status, value) = send(&router, method, uri, body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["code"], "not_found");
    assert!(value["message"].as_str().unwrap_or_default().contains("77"));
}

#[tokio::test]
async fn make_friends_with_missing_target_succeeds_with_placeholder() {
    let (store, router) = amity::router();
    let alice = create(&router, "Alice", 30).await;

    let body = json!({ "source_id": alice, "target_id": 9_999 }).to_string();
    let (status, value) = send(&router, Method::POST, "/make_friends", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["target_name"], Value::Null);
    assert_eq!(value["message"], "Alice and <unknown> are friends now");

    let user = store.find_by_id(amity::UserId::new(alice)).expect("alice stored");
    assert_eq!(user.friends, vec![amity::UserId::new(9_999)]);
}

#[tokio::test]
async fn friends_listing_keeps_a_null_slot_for_deleted_friends() {
    let (_, router) = amity::router();
    let alice = create(&router, "Alice", 30).await;
    let bob = create(&router, "Bob", 25).await;
    let carol = create(&router, "Carol", 41).await;

    for target in [bob, carol] {
        let body = json!({ "source_id": alice, "target_id": target }).to_string();
        let (status, _) = send(&router, Method::POST, "/make_friends", Some(&body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let body = json!({ "target_id": bob }).to_string();
    let (status, _) = send(&router, Method::DELETE, "/delete", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, value) = send(&router, Method::GET, &format!("/friends/{alice}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!([null, "Carol"]));
}

#[tokio::test]
async fn wrong_method_on_known_route_is_not_allowed() {
    let (_, router) = amity::router();
    let (status, _) = send(&router, Method::GET, "/create", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
