use std::sync::Arc;

use service::errors::ServiceError;
use service::medicine::{repository::MedicineRepository, service::MedicineService};

use crate::errors::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub medicines: MedicineService,
    /// Answer domain errors with HTTP 200 instead of their own status.
    pub legacy_error_status: bool,
}

impl AppState {
    pub fn new(repo: Arc<dyn MedicineRepository>, legacy_error_status: bool) -> Self {
        Self { medicines: MedicineService::new(repo), legacy_error_status }
    }

    pub fn api_error(&self, e: ServiceError) -> ApiError {
        ApiError::from_service(e, self.legacy_error_status)
    }
}
