use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenLifetimes;
use marketplace_service::domain::identity::models::EmailAddress;
use marketplace_service::domain::identity::models::ProvisionIdentityCommand;
use marketplace_service::domain::identity::ports::SessionServicePort;
use marketplace_service::domain::identity::service::SessionService;
use marketplace_service::domain::product::service::ProductService;
use marketplace_service::domain::vendor::service::VendorService;
use marketplace_service::inbound::http::router::create_router;
use marketplace_service::inbound::http::router::AppState;
use marketplace_service::outbound::health::StaticHealthProbe;
use marketplace_service::outbound::repositories::InMemoryIdentityRepository;
use marketplace_service::outbound::repositories::InMemoryProductRepository;
use marketplace_service::outbound::repositories::InMemoryVendorRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "pw123";

/// Test application that spawns a real server backed by in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub sessions: Arc<SessionService<InMemoryIdentityRepository>>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // bcrypt minimum cost keeps the suite fast
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            PasswordHasher::with_cost(4),
            TokenLifetimes::default(),
        ));

        let vendors = Arc::new(InMemoryVendorRepository::new());
        let products = Arc::new(InMemoryProductRepository::new(Arc::clone(&vendors)));
        let sessions = Arc::new(SessionService::new(
            Arc::new(InMemoryIdentityRepository::new()),
            authenticator,
        ));

        let state = AppState {
            app_name: "B2Bmarket".into(),
            session_service: sessions.clone(),
            vendor_service: Arc::new(VendorService::new(Arc::clone(&vendors))),
            product_service: Arc::new(ProductService::new(products, vendors)),
            health_probe: Arc::new(StaticHealthProbe),
        };

        let router = create_router(state, &[]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            sessions,
        }
    }

    /// Provision a login identity directly through the session service
    pub async fn create_identity(&self, email: &str, status: Option<&str>) {
        self.sessions
            .provision_identity(ProvisionIdentityCommand {
                email: EmailAddress::new(email.to_string()).unwrap(),
                password: PASSWORD.to_string(),
                status: status.map(str::to_string),
            })
            .await
            .expect("Failed to provision identity");
    }

    pub async fn disable_identity(&self, email: &str) {
        self.sessions
            .set_active(&EmailAddress::new(email.to_string()).unwrap(), false)
            .await
            .expect("Failed to disable identity");
    }

    /// Log in and return the `data` object of the response
    pub async fn login(&self, email: &str) -> Value {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Create a vendor over HTTP and return its id
    pub async fn create_vendor(&self, name: &str, email: Option<&str>) -> i64 {
        let response = self
            .post("/api/vendors")
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["id"].as_i64().expect("Vendor id missing")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(&format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
