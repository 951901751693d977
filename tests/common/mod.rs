use marketplace_service::config::{Config, DatabaseConfig, ServerConfig};
use marketplace_service::startup::Application;
use reqwest::StatusCode;
use secrecy::Secret;
use serde_json::{json, Value};

pub const TEST_ADMIN_ID: &str = "test-admin";
pub const TEST_VENDOR_USER_ID: &str = "test-vendor-user";
pub const TEST_CUSTOMER_ID: &str = "test-customer";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: mongodb::Database,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("marketplace_test_{}", uuid::Uuid::new_v4());

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            database: DatabaseConfig {
                url: Secret::new(
                    std::env::var("TEST_MONGODB_URI")
                        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                ),
                db_name: db_name.clone(),
            },
            service_name: "marketplace-service-test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let db = app.db().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub fn get(&self, path: &str, user_id: &str, role: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.address, path))
            .header("X-User-Id", user_id)
            .header("X-User-Role", role)
    }

    pub fn post(&self, path: &str, user_id: &str, role: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.address, path))
            .header("X-User-Id", user_id)
            .header("X-User-Role", role)
    }

    pub fn put(&self, path: &str, user_id: &str, role: &str) -> reqwest::RequestBuilder {
        self.client
            .put(format!("{}{}", self.address, path))
            .header("X-User-Id", user_id)
            .header("X-User-Role", role)
    }

    pub fn delete(&self, path: &str, user_id: &str, role: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(format!("{}{}", self.address, path))
            .header("X-User-Id", user_id)
            .header("X-User-Role", role)
    }

    /// Register a vendor profile for `user_id` and approve it as the admin.
    /// Returns the approved vendor document.
    pub async fn seed_approved_vendor(&self, user_id: &str) -> Value {
        let response = self
            .post("/vendors", user_id, "vendor")
            .json(&json!({
                "company_name": "Acme Studios",
                "contact_email": "owner@acme.test",
                "contact_phone": "+1-555-0100"
            }))
            .send()
            .await
            .expect("Failed to register vendor");
        assert_eq!(response.status(), StatusCode::CREATED);
        let vendor: Value = response.json().await.expect("Failed to parse vendor");
        let vendor_id = vendor["_id"].as_str().expect("Vendor missing id");

        let response = self
            .put(
                &format!("/admin/vendors/{}/approve", vendor_id),
                TEST_ADMIN_ID,
                "admin",
            )
            .json(&json!({ "status": "approved" }))
            .send()
            .await
            .expect("Failed to approve vendor");
        assert_eq!(response.status(), StatusCode::OK);

        response.json().await.expect("Failed to parse vendor")
    }

    /// Create a package owned by the vendor. Returns the package document.
    pub async fn seed_package(&self, vendor_user_id: &str, vendor_id: &str, price: f64) -> Value {
        let response = self
            .post("/packages", vendor_user_id, "vendor")
            .json(&json!({
                "vendor_id": vendor_id,
                "name": "Full Day Shoot",
                "price": price,
                "duration_minutes": 480
            }))
            .send()
            .await
            .expect("Failed to create package");
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse package")
    }

    /// Create a time slot with the given capacity. Returns the slot document.
    pub async fn seed_slot(&self, vendor_user_id: &str, vendor_id: &str, capacity: i32) -> Value {
        let response = self
            .post("/time-slots", vendor_user_id, "vendor")
            .json(&json!({
                "vendor_id": vendor_id,
                "slot_date": "2026-10-01",
                "start_time": "09:00",
                "end_time": "17:00",
                "capacity": capacity
            }))
            .send()
            .await
            .expect("Failed to create time slot");
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse time slot")
    }

    /// Create a booking as the test customer. Returns the booking document.
    pub async fn create_booking(
        &self,
        vendor_id: &str,
        package_id: &str,
        time_slot_id: Option<&str>,
    ) -> Value {
        let response = self
            .post("/bookings", TEST_CUSTOMER_ID, "customer")
            .json(&json!({
                "vendor_id": vendor_id,
                "package_id": package_id,
                "time_slot_id": time_slot_id,
                "customer_name": "Jamie Doe",
                "customer_email": "jamie@example.test"
            }))
            .send()
            .await
            .expect("Failed to create booking");
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse booking")
    }

    /// Fetch the vendor's wallet as the admin.
    pub async fn get_wallet(&self, vendor_id: &str) -> Value {
        let response = self
            .get(&format!("/wallets/{}", vendor_id), TEST_ADMIN_ID, "admin")
            .send()
            .await
            .expect("Failed to fetch wallet");
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("Failed to parse wallet")
    }

    /// Fetch a time slot via the public listing.
    pub async fn get_slot(&self, vendor_id: &str, slot_id: &str) -> Value {
        let response = self
            .client
            .get(format!("{}/time-slots?vendor_id={}", self.address, vendor_id))
            .send()
            .await
            .expect("Failed to list time slots");
        assert_eq!(response.status(), StatusCode::OK);
        let slots: Vec<Value> = response.json().await.expect("Failed to parse time slots");
        slots
            .into_iter()
            .find(|s| s["_id"] == slot_id)
            .expect("Slot not found in listing")
    }

    /// Cleanup test database after test completes.
    pub async fn cleanup(&self) {
        self.db
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }
}
