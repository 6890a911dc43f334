use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "medicine_store_operations_total",
        "Medicine operations handled, by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register operations_total")
});

pub static STORAGE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "medicine_store_storage_errors_total",
        "Requests failed because the data file was unavailable"
    )
    .expect("register storage_errors_total")
});

/// Count one finished operation.
pub fn observe<T>(operation: &str, result: &Result<T, ServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(ServiceError::Validation(_)) => "invalid",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::StorageUnavailable(_)) => {
            STORAGE_ERRORS_TOTAL.inc();
            "storage_error"
        }
    };
    OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics_handler() -> impl IntoResponse {
    let (status, body) = encode_metrics();
    (status, [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body)
}
