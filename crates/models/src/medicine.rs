use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::price;

/// One entry of the data file.
///
/// Both fields are optional on disk: a record without a name is kept but never
/// listed or matched, and a record without a price has no known price. A price
/// written as `null` or `""` reads back as absent. Keys this service does not
/// know about are carried through a rewrite unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Medicine {
    pub fn new(name: impl Into<String>, price: Option<f64>) -> Self {
        Self { name: Some(name.into()), price, extra: Map::new() }
    }

    /// Non-empty name, if any.
    pub fn listed_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Exact, case-sensitive match.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    pub fn display_price(&self) -> String {
        price::display(self.price)
    }
}

/// The whole data file: `{ "medicines": [...] }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MedicineDocument {
    pub medicines: Vec<Medicine>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MedicineDocument {
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.medicines.iter().position(|m| m.is_named(name))
    }

    pub fn find(&self, name: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.is_named(name))
    }

    /// Mean over every record that carries a price.
    pub fn average_price(&self) -> Option<f64> {
        price::mean(self.medicines.iter().filter_map(|m| m.price))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawPrice>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawPrice::Number(n)) => Ok(Some(n)),
        Some(RawPrice::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawPrice::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid price {s:?}"))),
    }
}
