use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Counter, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static PROMETHEUS_REGISTRY: OnceLock<Registry> = OnceLock::new();
pub static BOOKINGS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PAYOUTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static COMMISSION_AMOUNT_TOTAL: OnceLock<Counter> = OnceLock::new();

pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }

    let registry = Registry::new();

    let bookings_counter = IntCounterVec::new(
        Opts::new(
            "marketplace_bookings_total",
            "Booking lifecycle events by status",
        ),
        &["status"],
    )
    .expect("Failed to create marketplace_bookings_total metric");

    let payouts_counter = IntCounterVec::new(
        Opts::new(
            "marketplace_payouts_total",
            "Payout lifecycle events by status",
        ),
        &["status"],
    )
    .expect("Failed to create marketplace_payouts_total metric");

    let commission_counter = Counter::with_opts(Opts::new(
        "marketplace_commission_amount_total",
        "Total platform commission accrued on confirmed bookings",
    ))
    .expect("Failed to create marketplace_commission_amount_total metric");

    registry
        .register(Box::new(bookings_counter.clone()))
        .expect("Failed to register marketplace_bookings_total");
    registry
        .register(Box::new(payouts_counter.clone()))
        .expect("Failed to register marketplace_payouts_total");
    registry
        .register(Box::new(commission_counter.clone()))
        .expect("Failed to register marketplace_commission_amount_total");

    PROMETHEUS_REGISTRY
        .set(registry)
        .expect("Failed to set prometheus registry");
    BOOKINGS_TOTAL
        .set(bookings_counter)
        .expect("Failed to set marketplace_bookings_total");
    PAYOUTS_TOTAL
        .set(payouts_counter)
        .expect("Failed to set marketplace_payouts_total");
    COMMISSION_AMOUNT_TOTAL
        .set(commission_counter)
        .expect("Failed to set marketplace_commission_amount_total");
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = PROMETHEUS_REGISTRY.get() {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).ok();
        if let Ok(custom_metrics) = String::from_utf8(buffer) {
            output.push_str(&custom_metrics);
        }
    }

    output
}

/// Record a booking lifecycle event.
pub fn record_booking(status: &str) {
    if let Some(counter) = BOOKINGS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}

/// Record a payout lifecycle event.
pub fn record_payout(status: &str) {
    if let Some(counter) = PAYOUTS_TOTAL.get() {
        counter.with_label_values(&[status]).inc();
    }
}

/// Accrue commission earned on a confirmed booking.
pub fn record_commission(amount: f64) {
    if let Some(counter) = COMMISSION_AMOUNT_TOTAL.get() {
        counter.inc_by(amount);
    }
}
