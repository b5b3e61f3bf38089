mod common;

use common::TestApp;
use common::PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_ping() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/ping")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status_code": 200, "data": { "status": "ok" } }));
}

#[tokio::test]
async fn test_health_and_info() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/health")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["app"], "B2Bmarket");
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["database"], "ok");

    let response = app
        .get("/api/info")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["app_name"], "B2Bmarket");
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;

    // Email lookup ignores case
    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "Buyer@Example.com", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 900);
    assert_eq!(body["data"]["user"]["email"], "buyer@example.com");
    assert!(body["data"]["user"]["id"].is_i64());
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
    assert_ne!(body["data"]["access_token"], body["data"]["refresh_token"]);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "buyer@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email_looks_like_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_rejects_unverified_and_disabled_accounts() {
    let app = TestApp::spawn().await;
    app.create_identity("pending@example.com", Some("PENDING"))
        .await;
    app.create_identity("off@example.com", None).await;
    app.disable_identity("off@example.com").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "pending@example.com", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Account not verified");

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "off@example.com", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Account is disabled");
}

#[tokio::test]
async fn test_login_invalid_email_format() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "not-an-email", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_refresh_issues_working_access_token() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;
    let session = app.login("buyer@example.com").await;

    let response = app
        .post("/api/auth/refresh")
        .json(&json!({ "refresh_token": session["refresh_token"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 900);
    assert!(body["data"].get("refresh_token").is_none());

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": body["data"]["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["valid"], true);
}

#[tokio::test]
async fn test_refresh_rejects_access_token_and_empty_token() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;
    let session = app.login("buyer@example.com").await;

    let response = app
        .post("/api/auth/refresh")
        .json(&json!({ "refresh_token": session["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token type");

    let response = app
        .post("/api/auth/refresh")
        .json(&json!({ "refresh_token": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Refresh token is required");
}

#[tokio::test]
async fn test_verify_valid_token() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;
    let session = app.login("buyer@example.com").await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": session["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["user"], session["user"]);
    assert_eq!(body["data"]["payload"]["sub"], "buyer@example.com");
    assert_eq!(body["data"]["payload"]["user_id"], session["user"]["id"]);
    assert_eq!(body["data"]["payload"]["source"], "EMAIL");
}

#[tokio::test]
async fn test_verify_invalid_token_returns_empty_objects() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": "garbage" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"],
        json!({ "valid": false, "user": {}, "payload": {} })
    );

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Token is required");
}

#[tokio::test]
async fn test_second_login_revokes_first_session() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;

    let first = app.login("buyer@example.com").await;
    let second = app.login("buyer@example.com").await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": first["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["valid"], false);

    let response = app
        .post("/api/auth/refresh")
        .json(&json!({ "refresh_token": first["refresh_token"] }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid or expired refresh token");

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": second["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["valid"], true);
}

#[tokio::test]
async fn test_vendor_crud() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/vendors")
        .json(&json!({
            "name": "Acme",
            "first_name": "Ada",
            "email": "sales@acme.com"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["data"]["first_name"], "Ada");
    assert!(body["data"]["last_name"].is_null());
    assert!(body["data"]["created_at"].is_string());

    let response = app
        .patch(&format!("/api/vendors/{}", id))
        .json(&json!({ "phone_number": "555-0100" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["data"]["phone_number"], "555-0100");

    let response = app
        .get("/api/vendors")
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .delete(&format!("/api/vendors/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/vendors/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Vendor not found");
}

#[tokio::test]
async fn test_create_vendor_validation() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/vendors")
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post("/api/vendors")
        .json(&json!({ "name": "Acme", "email": "nope" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_product_requires_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/products")
        .json(&json!({ "name": "Widget", "price": "9.99" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Missing or invalid authorization header"
    );

    let response = app
        .post_authenticated("/api/products", "garbage")
        .json(&json!({ "name": "Widget", "price": "9.99" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token");
}

#[tokio::test]
async fn test_create_product_rejects_refresh_token() {
    let app = TestApp::spawn().await;
    app.create_identity("sales@acme.com", None).await;
    app.create_vendor("Acme", Some("sales@acme.com")).await;
    let session = app.login("sales@acme.com").await;

    let response = app
        .post_authenticated(
            "/api/products",
            session["refresh_token"].as_str().unwrap(),
        )
        .json(&json!({ "name": "Widget", "price": "9.99" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Invalid token type");
}

#[tokio::test]
async fn test_create_product_forbidden_for_non_vendor() {
    let app = TestApp::spawn().await;
    app.create_identity("buyer@example.com", None).await;
    let session = app.login("buyer@example.com").await;

    let response = app
        .post_authenticated("/api/products", session["access_token"].as_str().unwrap())
        .json(&json!({ "name": "Widget", "price": "9.99" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Only vendor accounts can add products. No vendor found with your email."
    );
}

#[tokio::test]
async fn test_product_lifecycle_for_vendor() {
    let app = TestApp::spawn().await;
    app.create_identity("sales@acme.com", None).await;
    let vendor_id = app.create_vendor("Acme", Some("SALES@acme.com")).await;
    let other_vendor_id = app.create_vendor("Globex", None).await;
    let session = app.login("sales@acme.com").await;
    let token = session["access_token"].as_str().unwrap().to_string();

    let response = app
        .post_authenticated("/api/products", &token)
        .json(&json!({
            "name": "Widget",
            "sku": "W-1",
            "description": "A widget",
            "price": "19.99"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let product_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["vendor_id"], vendor_id);
    assert_eq!(body["data"]["vendor_name"], "Acme");
    assert_eq!(body["data"]["price"], "19.99");

    // SKUs are unique across the catalogue
    let response = app
        .post_authenticated("/api/products", &token)
        .json(&json!({ "name": "Widget 2", "sku": "W-1", "price": "1.00" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .get(&format!("/api/products?vendor_id={}", vendor_id))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .get(&format!("/api/products?vendor_id={}", other_vendor_id))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"].as_array().unwrap().is_empty());

    let response = app
        .patch(&format!("/api/products/{}", product_id))
        .json(&json!({ "vendor_id": 9999 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .patch(&format!("/api/products/{}", product_id))
        .json(&json!({ "price": "5", "vendor_id": other_vendor_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["price"], "5.00");
    assert_eq!(body["data"]["vendor_name"], "Globex");
    assert_eq!(body["data"]["name"], "Widget");

    let response = app
        .delete(&format!("/api/products/{}", product_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/products/{}", product_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Product not found");
}

#[tokio::test]
async fn test_list_products_rejects_non_positive_vendor_filter() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/products?vendor_id=0")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_disabled_identity_loses_product_access() {
    let app = TestApp::spawn().await;
    app.create_identity("sales@acme.com", None).await;
    app.create_vendor("Acme", Some("sales@acme.com")).await;
    let session = app.login("sales@acme.com").await;

    app.disable_identity("sales@acme.com").await;

    let response = app
        .post_authenticated("/api/products", session["access_token"].as_str().unwrap())
        .json(&json!({ "name": "Widget", "price": "9.99" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Account is disabled");
}
