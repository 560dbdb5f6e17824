//! HTTP round trips through the full router
//!
//! request → session resolution → handler → AddressService → JSON/CSV response

use address_admin::prelude::*;
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use axum_test::multipart::MultipartForm;
use serde_json::{Value, json};

const USER_TOKEN: &str = "user-token";
const ADMIN_TOKEN: &str = "admin-token";

fn make_server() -> TestServer {
    let resolver = TokenSessionResolver::new()
        .with_token(USER_TOKEN, Session::new("user-1", Role::User))
        .with_token(ADMIN_TOKEN, Session::new("admin-1", Role::Admin));

    let router = ServerBuilder::new()
        .with_store(InMemoryAddressStore::new())
        .with_session_resolver(resolver)
        .build()
        .unwrap();
    TestServer::try_new(router).unwrap()
}

fn body(first_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Turing",
        "street": "Bletchley Park",
        "houseNumber": "8",
        "postalCode": "MK3 6EB",
        "city": "Milton Keynes",
        "country": "UK",
        "email": "alan@example.com",
        "company": "Acme"
    })
}

async fn create(server: &TestServer, first_name: &str) -> Value {
    let response = server
        .post("/api/addresses")
        .authorization_bearer(USER_TOKEN)
        .json(&body(first_name))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = make_server();
    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "address-admin");
    }
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_rest_create_json() {
    let server = make_server();
    let data = create(&server, "Alan").await;

    assert_eq!(data["firstName"], "Alan");
    assert_eq!(data["company"], "Acme");
    assert_eq!(data["salutation"], Value::Null);
    Uuid::parse_str(data["id"].as_str().unwrap()).unwrap();
    assert!(data["createdAt"].is_string());
}

#[tokio::test]
async fn test_rest_create_urlencoded() {
    let server = make_server();
    let response = server
        .post("/api/addresses")
        .authorization_bearer(USER_TOKEN)
        .form(&[
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
            ("street", "St James Sq"),
            ("houseNumber", "12"),
            ("postalCode", "SW1Y"),
            ("city", "London"),
            ("country", "UK"),
            ("email", "ada@example.com"),
        ])
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["firstName"], "Ada");
    assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn test_rest_create_multipart() {
    let server = make_server();
    let form = MultipartForm::new()
        .add_text("firstName", "Grace")
        .add_text("lastName", "Hopper")
        .add_text("street", "Navy Yard")
        .add_text("houseNumber", "1")
        .add_text("postalCode", "10001")
        .add_text("city", "New York")
        .add_text("country", "USA")
        .add_text("email", "grace@example.com");

    let response = server
        .post("/api/addresses")
        .authorization_bearer(USER_TOKEN)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["data"]["city"], "New York");
}

#[tokio::test]
async fn test_rest_create_validation_failure() {
    let server = make_server();
    let mut input = body("Alan");
    input["email"] = json!("not-an-email");
    input.as_object_mut().unwrap().remove("lastName");

    let response = server
        .post("/api/addresses")
        .authorization_bearer(USER_TOKEN)
        .json(&input)
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["fieldErrors"]["email"], json!(["Invalid email address"]));
    assert_eq!(body["fieldErrors"]["lastName"], json!(["Last name is required"]));
    assert_eq!(body["errorKind"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_rest_get() {
    let server = make_server();
    let created = create(&server, "Alan").await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .get(&format!("/api/addresses/{}", id))
        .authorization_bearer(USER_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], created);
    assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn test_rest_get_not_found() {
    let server = make_server();
    for id in [Uuid::new_v4().to_string(), "garbage".to_string()] {
        let response = server
            .get(&format!("/api/addresses/{}", id))
            .authorization_bearer(USER_TOKEN)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"], "Address not found.");
    }
}

#[tokio::test]
async fn test_rest_update_patch_and_put() {
    let server = make_server();
    let created = create(&server, "Alan").await;
    let path = format!("/api/addresses/{}", created["id"].as_str().unwrap());

    let response = server
        .patch(&path)
        .authorization_bearer(USER_TOKEN)
        .json(&json!({"city": "Cambridge"}))
        .await;
    response.assert_status_ok();
    let data = response.json::<Value>()["data"].clone();
    assert_eq!(data["city"], "Cambridge");
    assert_eq!(data["firstName"], "Alan");

    let response = server
        .put(&path)
        .authorization_bearer(USER_TOKEN)
        .form(&[("company", "")])
        .await;
    response.assert_status_ok();
    let data = response.json::<Value>()["data"].clone();
    assert_eq!(data["company"], Value::Null);
    assert_eq!(data["city"], "Cambridge");
}

#[tokio::test]
async fn test_rest_update_missing_is_not_found() {
    let server = make_server();
    let response = server
        .patch(&format!("/api/addresses/{}", Uuid::new_v4()))
        .authorization_bearer(USER_TOKEN)
        .json(&json!({"city": "Nowhere"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["errorKind"], "NOT_FOUND");
}

#[tokio::test]
async fn test_rest_delete_requires_admin() {
    let server = make_server();
    let created = create(&server, "Alan").await;
    let path = format!("/api/addresses/{}", created["id"].as_str().unwrap());

    let response = server.delete(&path).authorization_bearer(USER_TOKEN).await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": false, "error": "Forbidden", "errorKind": "FORBIDDEN"})
    );

    let response = server.delete(&path).authorization_bearer(ADMIN_TOKEN).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"success": true, "error": null})
    );

    let response = server.get(&path).authorization_bearer(USER_TOKEN).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_rest_list_pagination() {
    let server = make_server();
    for i in 0..8 {
        create(&server, &format!("Person{}", i)).await;
    }

    let response = server
        .get("/api/addresses")
        .add_query_param("page", 2)
        .add_query_param("pageSize", 6)
        .authorization_bearer(USER_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 8);
    assert_eq!(
        body["pagination"],
        json!({
            "page": 2,
            "pageSize": 6,
            "total": 8,
            "totalPages": 2,
            "hasNext": false,
            "hasPrev": true
        })
    );
}

#[tokio::test]
async fn test_rest_list_page_size_clamped_and_echoed() {
    let server = make_server();
    create(&server, "Alan").await;

    let response = server
        .get("/api/addresses")
        .add_query_param("pageSize", 500)
        .authorization_bearer(USER_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["pageSize"], 100);
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_rest_list_huge_page() {
    let server = make_server();
    create(&server, "Alan").await;

    let response = server
        .get("/api/addresses")
        .add_query_param("page", i64::MAX)
        .authorization_bearer(USER_TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 1);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn test_rest_list_search() {
    let server = make_server();
    create(&server, "Alan").await;
    let mut other = body("Bob");
    other["company"] = json!("Globex");
    server
        .post("/api/addresses")
        .authorization_bearer(USER_TOKEN)
        .json(&other)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/addresses")
        .add_query_param("searchQuery", "acme")
        .authorization_bearer(USER_TOKEN)
        .await;
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["firstName"], "Alan");
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_rest_anonymous_is_unauthorized() {
    let server = make_server();
    let response = server.get("/api/addresses").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["total"], 0);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_rest_unknown_token_is_unauthorized() {
    let server = make_server();
    server
        .get("/api/addresses")
        .authorization_bearer("stolen")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rest_session_cookie() {
    let server = make_server();
    let response = server
        .get("/api/addresses")
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&format!("address_session={}", USER_TOKEN)).unwrap(),
        )
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_rest_unsupported_content_type() {
    let server = make_server();
    let response = server
        .post("/api/addresses")
        .authorization_bearer(USER_TOKEN)
        .text("firstName=Alan")
        .await;

    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.json::<Value>()["code"], "UNSUPPORTED_CONTENT_TYPE");
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_rest_export_csv() {
    let server = make_server();
    create(&server, "Jo,hn").await;
    create(&server, "Plain").await;

    let response = server
        .get("/api/addresses/export")
        .authorization_bearer(USER_TOKEN)
        .await;

    response.assert_status_ok();
    let headers = response.headers();
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let disposition = headers
        .get(HeaderName::from_static("content-disposition"))
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"addresses_"));
    assert!(disposition.ends_with(".csv\""));

    let csv = response.text();
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Salutation,First Name,Last Name"));
    assert!(csv.contains(",\"Jo,hn\",Turing,"));
}

#[tokio::test]
async fn test_rest_export_filtered_and_unauthorized() {
    let server = make_server();
    create(&server, "Alan").await;

    let response = server
        .get("/api/addresses/export")
        .add_query_param("searchQuery", "nomatch")
        .authorization_bearer(USER_TOKEN)
        .await;
    response.assert_status_ok();
    assert_eq!(response.text().lines().count(), 1);

    let response = server.get("/api/addresses/export").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["csv"], Value::Null);
    assert_eq!(body["error"], "Unauthorized");
}
