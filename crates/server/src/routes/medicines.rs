use axum::{
    extract::{rejection::FormRejection, Path, State},
    Form, Json,
};
use models::input::{MedicineForm, NameForm};
use models::views::{AveragePrice, MedicineList, MedicineView, Message};
use tracing::debug;

use crate::errors::ApiError;
use crate::metrics;
use crate::state::AppState;

// A body that is not a decodable form counts as empty input, so validation
// reports it like any other missing field.
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(f)) => f,
        Err(rejection) => {
            debug!(error = %rejection, "form rejected, treating as empty");
            T::default()
        }
    }
}

/// 列出全部药品
#[utoipa::path(get, path = "/medicines", tag = "medicines", responses((status = 200, description = "All named medicines", body = crate::openapi::MedicineListDoc), (status = 500, description = "Data file unavailable")))]
pub async fn list_medicines(State(state): State<AppState>) -> Result<Json<MedicineList>, ApiError> {
    let res = state.medicines.list().await;
    metrics::observe("list", &res);
    res.map(Json).map_err(|e| state.api_error(e))
}

/// 按名称获取单个药品
#[utoipa::path(get, path = "/medicines/{name}", tag = "medicines", params(("name" = String, Path, description = "Exact, case-sensitive medicine name")), responses((status = 200, description = "Medicine found", body = crate::openapi::MedicineDoc), (status = 404, description = "Medicine not found", body = crate::openapi::DomainErrorDoc)))]
pub async fn get_medicine(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MedicineView>, ApiError> {
    let res = state.medicines.get(&name).await;
    metrics::observe("get", &res);
    res.map(Json).map_err(|e| state.api_error(e))
}

/// 新增药品
#[utoipa::path(post, path = "/create", tag = "medicines", request_body(content = crate::openapi::MedicineFormDoc, content_type = "application/x-www-form-urlencoded"), responses((status = 200, description = "Created", body = crate::openapi::MessageDoc), (status = 400, description = "Invalid name or price", body = crate::openapi::DomainErrorDoc), (status = 500, description = "Data file unavailable")))]
pub async fn create_medicine(
    State(state): State<AppState>,
    form: Result<Form<MedicineForm>, FormRejection>,
) -> Result<Json<Message>, ApiError> {
    let res = state.medicines.create(form_or_default(form)).await;
    metrics::observe("create", &res);
    res.map(Json).map_err(|e| state.api_error(e))
}

/// 更新药品价格
#[utoipa::path(post, path = "/update", tag = "medicines", request_body(content = crate::openapi::MedicineFormDoc, content_type = "application/x-www-form-urlencoded"), responses((status = 200, description = "Updated", body = crate::openapi::MessageDoc), (status = 400, description = "Invalid name or price", body = crate::openapi::DomainErrorDoc), (status = 404, description = "Medicine not found", body = crate::openapi::DomainErrorDoc)))]
pub async fn update_medicine(
    State(state): State<AppState>,
    form: Result<Form<MedicineForm>, FormRejection>,
) -> Result<Json<Message>, ApiError> {
    let res = state.medicines.update(form_or_default(form)).await;
    metrics::observe("update", &res);
    res.map(Json).map_err(|e| state.api_error(e))
}

/// 删除药品
#[utoipa::path(delete, path = "/delete", tag = "medicines", request_body(content = crate::openapi::NameFormDoc, content_type = "application/x-www-form-urlencoded"), responses((status = 200, description = "Deleted", body = crate::openapi::MessageDoc), (status = 404, description = "Medicine not found", body = crate::openapi::DomainErrorDoc)))]
pub async fn delete_medicine(
    State(state): State<AppState>,
    form: Result<Form<NameForm>, FormRejection>,
) -> Result<Json<Message>, ApiError> {
    let res = state.medicines.delete(form_or_default(form)).await;
    metrics::observe("delete", &res);
    res.map(Json).map_err(|e| state.api_error(e))
}

/// 平均价格
#[utoipa::path(get, path = "/average_price", tag = "medicines", responses((status = 200, description = "Mean price over priced medicines", body = crate::openapi::AveragePriceDoc)))]
pub async fn average_price(State(state): State<AppState>) -> Result<Json<AveragePrice>, ApiError> {
    let res = state.medicines.average_price().await;
    metrics::observe("average_price", &res);
    res.map(Json).map_err(|e| state.api_error(e))
}
