//! End-to-end tests for the JSON API, driven through the router with the
//! mock checkout provider and the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use folio_payments::{
    CheckoutService, CheckoutSettings, MockCheckoutProvider, SessionBuilder, SessionDescriptor,
};
use folio_server::{AppState, app};
use folio_store::MemoryStore;

struct TestApp {
    router: Router,
    provider: Arc<MockCheckoutProvider>,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let provider = Arc::new(MockCheckoutProvider::new());
        let store = Arc::new(MemoryStore::new());
        let settings = CheckoutSettings::new("https://example.com", "usd").unwrap();
        let checkout = CheckoutService::new(provider.clone(), SessionBuilder::new(settings));
        let router = app(AppState::new(checkout, store.clone()));
        Self {
            router,
            provider,
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    fn last_descriptor(&self) -> SessionDescriptor {
        self.provider.last_descriptor().expect("provider was not called")
    }
}

fn checkout_body(customer_info: Value) -> Value {
    json!({ "serviceId": "1", "customerInfo": customer_info })
}

fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "projectDetails": "Need a full audit",
        "budget": 497
    })
}

fn fields(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .expect("details must be an array")
        .iter()
        .map(|issue| issue["field"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_end_to_end() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/checkout", &checkout_body(jane())).await;

    assert_eq!(status, StatusCode::OK);
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://checkout.stripe.com/"));
}

#[tokio::test]
async fn test_checkout_amount_in_minor_units() {
    let app = TestApp::new();
    app.post("/api/checkout", &checkout_body(jane())).await;

    let descriptor = app.last_descriptor();
    assert_eq!(descriptor.line_items[0].unit_amount, 49_700);
    assert_eq!(descriptor.line_items[0].name, "Service: 1");
    assert_eq!(descriptor.cancel_url, "https://example.com/services/1");
    assert_eq!(
        descriptor.success_url,
        "https://example.com/checkout/success?session_id={CHECKOUT_SESSION_ID}"
    );
}

#[tokio::test]
async fn test_checkout_missing_email() {
    let app = TestApp::new();
    let mut info = jane();
    info.as_object_mut().unwrap().remove("email");

    let (status, body) = app.post("/api/checkout", &checkout_body(info)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
    assert!(fields(&body).contains(&"customerInfo.email".to_string()));
    assert!(app.provider.recorded().is_empty());
}

#[tokio::test]
async fn test_checkout_malformed_email() {
    let app = TestApp::new();
    let mut info = jane();
    info["email"] = json!("not-an-email");

    let (status, body) = app.post("/api/checkout", &checkout_body(info)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fields(&body), vec!["customerInfo.email"]);
}

#[tokio::test]
async fn test_checkout_wrong_types_reported_per_field() {
    let app = TestApp::new();
    let mut info = jane();
    info["email"] = json!("not-an-email");
    info["phone"] = json!(5_551_234);
    let body = json!({ "serviceId": 1, "customerInfo": info });

    let (status, body) = app.post("/api/checkout", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        fields(&body),
        vec!["customerInfo.email", "customerInfo.phone", "serviceId"]
    );
    assert!(app.provider.recorded().is_empty());
}

#[tokio::test]
async fn test_checkout_bad_budgets() {
    let app = TestApp::new();
    for budget in [json!(0), json!(-10), json!("497"), json!(12.5), json!(null)] {
        let mut info = jane();
        info["budget"] = budget.clone();

        let (status, body) = app.post("/api/checkout", &checkout_body(info)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "budget {budget}");
        assert!(fields(&body).contains(&"customerInfo.budget".to_string()));
    }
    assert!(app.provider.recorded().is_empty());
}

#[tokio::test]
async fn test_checkout_long_details_truncated() {
    let app = TestApp::new();
    let mut info = jane();
    info["projectDetails"] = json!("d".repeat(180));

    let (status, _) = app.post("/api/checkout", &checkout_body(info)).await;
    assert_eq!(status, StatusCode::OK);

    let description = app.last_descriptor().line_items[0].description.clone();
    assert_eq!(description, format!("{}...", "d".repeat(100)));
}

#[tokio::test]
async fn test_checkout_invalid_json() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/checkout")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request data");
    assert_eq!(fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_checkout_provider_failure_is_generic() {
    let app = TestApp::new();
    app.provider.fail_requests(true);

    let (status, body) = app.post("/api/checkout", &checkout_body(jane())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create checkout session" }));
}

#[tokio::test]
async fn test_checkout_session_lookup() {
    let app = TestApp::new();
    let (_, body) = app.post("/api/checkout", &checkout_body(jane())).await;
    let url = body["url"].as_str().unwrap();
    let session_id = url.rsplit('/').next().unwrap();

    let (status, summary) = app.get(&format!("/api/checkout/session/{session_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["amountTotal"], 49_700);
    assert_eq!(summary["customerEmail"], "jane@example.com");
    assert_eq!(summary["serviceId"], "1");

    let (status, body) = app.get("/api/checkout/session/cs_test_unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Checkout session not found");
}

// ============================================================================
// Newsletter
// ============================================================================

#[tokio::test]
async fn test_newsletter_subscribe_twice() {
    let app = TestApp::new();
    let signup = json!({ "email": "reader@example.com", "type": "ecommerce" });

    let (first_status, first) = app.post("/api/newsletter", &signup).await;
    let (second_status, second) = app.post("/api/newsletter", &signup).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first["alreadySubscribed"], false);
    assert_eq!(second["alreadySubscribed"], true);

    let strip = |mut body: Value| {
        body.as_object_mut().unwrap().remove("alreadySubscribed");
        body
    };
    assert_eq!(strip(first), strip(second));
    assert_eq!(app.store.subscriptions().await.len(), 1);
}

#[tokio::test]
async fn test_newsletter_invalid_type() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/newsletter", &json!({ "email": "reader@example.com", "type": "sports" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(fields(&body), vec!["type"]);
}

#[tokio::test]
async fn test_newsletter_descriptor() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/newsletter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["methods"], json!(["POST"]));
}

// ============================================================================
// Contact
// ============================================================================

#[tokio::test]
async fn test_contact_short_subject() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/contact",
            &json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "subject": "Hey",
                "message": "I would like to talk about an audit."
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid form data");
    assert_eq!(fields(&body), vec!["subject"]);
    assert_eq!(
        body["details"][0]["message"],
        "Subject must be at least 5 characters"
    );
}

#[tokio::test]
async fn test_contact_stored() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/contact",
            &json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "subject": "Project inquiry",
                "message": "I would like to talk about an audit.",
                "type": "consulting"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let contacts = app.store.contacts().await;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].kind.as_deref(), Some("consulting"));
    assert_eq!(body["id"].as_str(), contacts[0].id.as_deref());
}

// ============================================================================
// Catalog & health
// ============================================================================

#[tokio::test]
async fn test_services() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let slug = body[0]["slug"].as_str().unwrap().to_string();
    let (status, service) = app.get(&format!("/api/services/{slug}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(service["slug"], slug);

    let (status, by_id) = app.get("/api/services/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["id"], "1");

    let (status, _) = app.get("/api/services/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = TestApp::new();
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "mock");
    assert_eq!(body["store"], "memory");

    let (status, body) = app.get("/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
