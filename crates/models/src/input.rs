//! Form inputs for the mutating operations.
//!
//! Every field arrives as optional text so that a missing field, an empty
//! field and a malformed price are all reported the same way instead of
//! failing inside the extractor.

use serde::Deserialize;

use crate::errors::ModelError;
use crate::price;

pub const INVALID_NAME_AND_PRICE: &str = "Provide valid entries for Name and Price";
pub const INVALID_NAME: &str = "Provide a valid entry for Name";

/// `name` + `price` form used by create and update.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MedicineForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// `name`-only form used by delete.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NameForm {
    #[serde(default)]
    pub name: Option<String>,
}

/// A validated name/price pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedName {
    pub name: String,
    pub price: f64,
}

impl MedicineForm {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self { name: Some(name.into()), price: Some(price.into()) }
    }

    pub fn validate(self) -> Result<PricedName, ModelError> {
        let invalid = || ModelError::Validation(INVALID_NAME_AND_PRICE.into());
        let name = self.name.filter(|n| !n.trim().is_empty()).ok_or_else(invalid)?;
        let raw = self.price.filter(|p| !p.trim().is_empty()).ok_or_else(invalid)?;
        let price = price::parse(&raw).map_err(|_| invalid())?;
        Ok(PricedName { name, price })
    }
}

impl NameForm {
    pub fn validate(self) -> Result<String, ModelError> {
        self.name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ModelError::Validation(INVALID_NAME.into()))
    }
}
