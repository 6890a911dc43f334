//! Response bodies returned by the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::medicine::Medicine;
use crate::price;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MedicineView {
    pub name: String,
    pub price: String,
}

impl MedicineView {
    /// `None` for records without a usable name.
    pub fn from_record(record: &Medicine) -> Option<Self> {
        record.listed_name().map(|name| Self { name: name.to_string(), price: record.display_price() })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MedicineList {
    pub medicines: Vec<MedicineView>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AveragePrice {
    pub average_price: String,
}

impl AveragePrice {
    pub fn from_mean(mean: Option<f64>) -> Self {
        let average_price = mean.map(price::format).unwrap_or_else(|| price::NO_VALID_PRICES.to_string());
        Self { average_price }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Structured payload for not-found and bad-input outcomes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DomainErrorBody {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl DomainErrorBody {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self { status: "error".into(), code: code.to_string(), message: message.into() }
    }
}
