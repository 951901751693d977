//! Application startup and lifecycle management.
//!
//! Owns the storage client lifecycle: connect at startup, hand the database
//! handle to the repository, serve until stopped.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use mongodb::{options::ClientOptions, Client};
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::handlers;
use crate::services::{
    BookingService, CommissionService, MarketplaceRepository, NotificationService, PayoutService,
    SlotCapacityTracker, WalletLedger,
};
use crate::AppState;

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(config.database.url.expose_secret())
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                AppError::DatabaseError(e.into())
            })?;
        client_options.app_name = Some("marketplace-service".to_string());

        let client = Client::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::DatabaseError(e.into())
        })?;
        let db = client.database(&config.database.db_name);

        let repository = MarketplaceRepository::new(&db);
        repository.init_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            AppError::DatabaseError(e)
        })?;

        let commission = CommissionService::new(repository.clone());
        let slots = SlotCapacityTracker::new(repository.clone());
        let wallet = WalletLedger::new(repository.clone());
        let notifications = NotificationService::new(repository.clone());
        let bookings = BookingService::new(
            repository.clone(),
            commission,
            slots.clone(),
            wallet.clone(),
            notifications.clone(),
        );
        let payouts = PayoutService::new(repository.clone(), wallet.clone(), notifications.clone());

        let state = AppState {
            db,
            config: config.clone(),
            repository,
            bookings,
            payouts,
            wallet,
            slots,
            notifications,
        };

        // Port 0 = random port, used by the test harness.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Marketplace service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &mongodb::Database {
        &self.state.db
    }

    fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            // Vendors
            .route("/vendors", post(handlers::vendors::register_vendor))
            .route("/vendors/:id", get(handlers::vendors::get_vendor))
            // Packages
            .route("/packages", post(handlers::packages::create_package))
            .route("/packages", get(handlers::packages::list_packages))
            .route("/packages/:id", get(handlers::packages::get_package))
            // Time slots
            .route("/time-slots", post(handlers::slots::create_time_slot))
            .route("/time-slots", get(handlers::slots::list_time_slots))
            .route("/time-slots/:id", delete(handlers::slots::delete_time_slot))
            // Bookings
            .route("/bookings", post(handlers::bookings::create_booking))
            .route(
                "/bookings/my-bookings",
                get(handlers::bookings::my_bookings),
            )
            .route("/bookings/:id", get(handlers::bookings::get_booking))
            .route(
                "/bookings/:id/status",
                put(handlers::bookings::update_booking_status),
            )
            // Wallets
            .route("/wallets/:vendor_id", get(handlers::wallets::get_wallet))
            .route(
                "/wallets/:vendor_id/transactions",
                get(handlers::wallets::list_wallet_transactions),
            )
            // Admin
            .route(
                "/admin/vendors/pending",
                get(handlers::admin::list_pending_vendors),
            )
            .route(
                "/admin/vendors/:id/approve",
                put(handlers::admin::approve_vendor),
            )
            .route(
                "/admin/vendors/:id/commission-rate",
                put(handlers::admin::set_vendor_commission_rate),
            )
            .route(
                "/admin/commission-settings",
                get(handlers::admin::get_commission_settings),
            )
            .route(
                "/admin/commission-settings",
                put(handlers::admin::update_commission_settings),
            )
            .route("/admin/payouts", post(handlers::admin::create_payout))
            .route("/admin/payouts", get(handlers::admin::list_payouts))
            .route(
                "/admin/payouts/:id/settle",
                put(handlers::admin::settle_payout),
            )
            .route("/admin/bookings", get(handlers::admin::list_bookings))
            .route("/admin/dashboard", get(handlers::admin::dashboard))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                        user_id = tracing::field::Empty,
                    )
                }),
            )
            .with_state(state)
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Self::router(self.state);
        axum::serve(self.listener, router).await
    }
}
