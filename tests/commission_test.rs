mod common;

use common::{TestApp, TEST_ADMIN_ID, TEST_CUSTOMER_ID, TEST_VENDOR_USER_ID};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn default_settings_are_created_on_first_read() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/admin/commission-settings", TEST_ADMIN_ID, "admin")
        .send()
        .await
        .expect("Failed to fetch settings");
    assert_eq!(response.status(), StatusCode::OK);
    let settings: Value = response.json().await.expect("Failed to parse settings");
    assert_eq!(settings["default_rate"], 15.0);

    app.cleanup().await;
}

#[tokio::test]
async fn updated_default_rate_applies_to_new_bookings() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/admin/commission-settings", TEST_ADMIN_ID, "admin")
        .json(&json!({ "default_rate": 20.0 }))
        .send()
        .await
        .expect("Failed to update settings");
    assert_eq!(response.status(), StatusCode::OK);
    let settings: Value = response.json().await.expect("Failed to parse settings");
    assert_eq!(settings["default_rate"], 20.0);
    assert_eq!(settings["updated_by"], TEST_ADMIN_ID);

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 1000.0).await;

    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;
    assert_eq!(booking["commission_amount"], 200.0);
    assert_eq!(booking["vendor_amount"], 800.0);

    app.cleanup().await;
}

#[tokio::test]
async fn vendor_override_beats_default_rate() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/admin/vendors/{}/commission-rate", vendor_id),
            TEST_ADMIN_ID,
            "admin",
        )
        .json(&json!({ "commission_rate": 10.0 }))
        .send()
        .await
        .expect("Failed to set commission rate");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 1000.0).await;
    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;
    assert_eq!(booking["commission_amount"], 100.0);
    assert_eq!(booking["vendor_amount"], 900.0);

    app.cleanup().await;
}

#[tokio::test]
async fn commission_rate_outside_range_is_rejected() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/admin/vendors/{}/commission-rate", vendor_id),
            TEST_ADMIN_ID,
            "admin",
        )
        .json(&json!({ "commission_rate": 150.0 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    app.cleanup().await;
}

#[tokio::test]
async fn commission_settings_require_admin() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/admin/commission-settings", TEST_CUSTOMER_ID, "customer")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .put("/admin/commission-settings", TEST_CUSTOMER_ID, "customer")
        .json(&json!({ "default_rate": 5.0 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.cleanup().await;
}
