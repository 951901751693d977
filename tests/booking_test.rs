mod common;

use common::{TestApp, TEST_ADMIN_ID, TEST_CUSTOMER_ID, TEST_VENDOR_USER_ID};
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_booking_freezes_commission_breakdown() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 1000.0).await;
    let package_id = package["_id"].as_str().unwrap();

    let booking = app.create_booking(vendor_id, package_id, None).await;

    assert_eq!(booking["total_amount"], 1000.0);
    assert_eq!(booking["commission_amount"], 150.0);
    assert_eq!(booking["vendor_amount"], 850.0);
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["payment_status"], "unpaid");
    assert_eq!(booking["customer_id"], TEST_CUSTOMER_ID);

    app.cleanup().await;
}

#[tokio::test]
async fn guest_booking_has_no_customer_id() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 250.0).await;

    let response = app
        .client
        .post(format!("{}/bookings", app.address))
        .json(&json!({
            "vendor_id": vendor_id,
            "package_id": package["_id"],
            "customer_name": "Walk-in Guest",
            "customer_email": "guest@example.test"
        }))
        .send()
        .await
        .expect("Failed to create booking");

    assert_eq!(response.status(), StatusCode::CREATED);
    let booking: Value = response.json().await.expect("Failed to parse booking");
    assert!(booking["customer_id"].is_null());

    app.cleanup().await;
}

#[tokio::test]
async fn vendor_confirmation_credits_wallet() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 1000.0).await;
    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;
    let booking_id = booking["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            TEST_VENDOR_USER_ID,
            "vendor",
        )
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to confirm booking");
    assert_eq!(response.status(), StatusCode::OK);
    let confirmed: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(confirmed["status"], "confirmed");
    assert!(!confirmed["confirmed_at"].is_null());

    let wallet = app.get_wallet(vendor_id).await;
    assert_eq!(wallet["balance"], 850.0);
    assert_eq!(wallet["total_earned"], 1000.0);
    assert_eq!(wallet["total_commission"], 150.0);
    assert_eq!(wallet["total_paid_out"], 0.0);

    // The earnings entry lands in the settlement log.
    let response = app
        .get(
            &format!("/wallets/{}/transactions", vendor_id),
            TEST_ADMIN_ID,
            "admin",
        )
        .send()
        .await
        .expect("Failed to list transactions");
    assert_eq!(response.status(), StatusCode::OK);
    let transactions: Vec<Value> = response.json().await.expect("Failed to parse transactions");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["transaction_type"], "booking_earnings");
    assert_eq!(transactions[0]["gross_amount"], 1000.0);
    assert_eq!(transactions[0]["commission_amount"], 150.0);
    assert_eq!(transactions[0]["net_amount"], 850.0);
    assert_eq!(transactions[0]["booking_id"], booking_id);

    app.cleanup().await;
}

#[tokio::test]
async fn reconfirming_does_not_credit_wallet_twice() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 500.0).await;
    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;
    let booking_id = booking["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            TEST_VENDOR_USER_ID,
            "vendor",
        )
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to confirm booking");
    assert_eq!(response.status(), StatusCode::OK);

    // An admin can re-set the same status, but the wallet credit only fires
    // on the transition into confirmed.
    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            TEST_ADMIN_ID,
            "admin",
        )
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to re-confirm booking");
    assert_eq!(response.status(), StatusCode::OK);

    let wallet = app.get_wallet(vendor_id).await;
    assert_eq!(wallet["balance"], 425.0);
    assert_eq!(wallet["total_earned"], 500.0);

    app.cleanup().await;
}

#[tokio::test]
async fn customer_cannot_cancel_confirmed_booking() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 300.0).await;
    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;
    let booking_id = booking["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            TEST_VENDOR_USER_ID,
            "vendor",
        )
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to confirm booking");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            TEST_CUSTOMER_ID,
            "customer",
        )
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.cleanup().await;
}

#[tokio::test]
async fn customer_cancelling_pending_booking_releases_slot() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 300.0).await;
    let slot = app.seed_slot(TEST_VENDOR_USER_ID, vendor_id, 1).await;
    let slot_id = slot["_id"].as_str().unwrap();

    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), Some(slot_id))
        .await;
    let booking_id = booking["_id"].as_str().unwrap();

    let reserved = app.get_slot(vendor_id, slot_id).await;
    assert_eq!(reserved["booked_count"], 1);
    assert_eq!(reserved["is_available"], false);

    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            TEST_CUSTOMER_ID,
            "customer",
        )
        .json(&json!({
            "status": "cancelled",
            "cancellation_reason": "Change of plans"
        }))
        .send()
        .await
        .expect("Failed to cancel booking");
    assert_eq!(response.status(), StatusCode::OK);
    let cancelled: Value = response.json().await.expect("Failed to parse booking");
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["cancellation_reason"], "Change of plans");
    assert!(!cancelled["cancelled_at"].is_null());

    let released = app.get_slot(vendor_id, slot_id).await;
    assert_eq!(released["booked_count"], 0);
    assert_eq!(released["is_available"], true);

    app.cleanup().await;
}

#[tokio::test]
async fn unrelated_vendor_cannot_touch_booking() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    app.seed_approved_vendor("other-vendor-user").await;

    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 300.0).await;
    let booking = app
        .create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;
    let booking_id = booking["_id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/bookings/{}/status", booking_id),
            "other-vendor-user",
            "vendor",
        )
        .json(&json!({ "status": "confirmed" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    app.cleanup().await;
}

#[tokio::test]
async fn my_bookings_returns_customer_and_vendor_views() {
    let app = TestApp::spawn().await;

    let vendor = app.seed_approved_vendor(TEST_VENDOR_USER_ID).await;
    let vendor_id = vendor["_id"].as_str().unwrap();
    let package = app.seed_package(TEST_VENDOR_USER_ID, vendor_id, 300.0).await;
    app.create_booking(vendor_id, package["_id"].as_str().unwrap(), None)
        .await;

    let response = app
        .get("/bookings/my-bookings", TEST_CUSTOMER_ID, "customer")
        .send()
        .await
        .expect("Failed to list bookings");
    assert_eq!(response.status(), StatusCode::OK);
    let bookings: Vec<Value> = response.json().await.expect("Failed to parse bookings");
    assert_eq!(bookings.len(), 1);

    let response = app
        .get("/bookings/my-bookings", TEST_VENDOR_USER_ID, "vendor")
        .send()
        .await
        .expect("Failed to list bookings");
    assert_eq!(response.status(), StatusCode::OK);
    let bookings: Vec<Value> = response.json().await.expect("Failed to parse bookings");
    assert_eq!(bookings.len(), 1);

    app.cleanup().await;
}
