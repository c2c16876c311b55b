use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Number, Value};

use crate::errors::ServiceError;

/// Body-level error returned for lookup, update and delete misses.
pub const NOT_FOUND_MESSAGE: &str = "Medicine not found";

/// Price as persisted: any JSON number, or whatever else ended up in the file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Number(Number),
    Other(Value),
}

impl Price {
    /// Build a price from form input. JSON has no NaN or infinity.
    pub fn from_f64(price: f64) -> Result<Self, ServiceError> {
        Number::from_f64(price)
            .map(Price::Number)
            .ok_or_else(|| ServiceError::validation(format!("price must be a finite number, got {price}")))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Price::Number(n) => n.as_f64(),
            Price::Other(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Price::Number(n) => Value::Number(n.clone()),
            Price::Other(v) => v.clone(),
        }
    }
}

// `null` must survive a rewrite, so a present field is always `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    Price::deserialize(deserializer).map(Some)
}

/// A record whose `name` matched a lookup. Fields the service does not model
/// are kept in `extra` so the record serializes back exactly as stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    pub name: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Medicine {
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self { name: name.into(), price: Some(price), extra: Map::new() }
    }
}

/// The whole persisted document, normally `{"medicines": [...]}`.
///
/// Kept as parsed JSON: listing returns it untouched, and a record is only
/// inspected when a scan reaches it. A record without a string `name` never
/// matches; one that is not an object or has no `name` at all stops the scan
/// with [`ServiceError::BadRecord`], but only if it comes before the match.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog(Value);

impl Default for Catalog {
    fn default() -> Self {
        Self(json!({ "medicines": [] }))
    }
}

impl Catalog {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn medicines(&self) -> Result<&Vec<Value>, ServiceError> {
        self.0
            .get("medicines")
            .and_then(Value::as_array)
            .ok_or_else(|| ServiceError::BadRecord("document has no `medicines` array".into()))
    }

    fn medicines_mut(&mut self) -> Result<&mut Vec<Value>, ServiceError> {
        self.0
            .get_mut("medicines")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| ServiceError::BadRecord("document has no `medicines` array".into()))
    }

    /// Index of the first record whose name matches exactly (case-sensitive, untrimmed).
    pub fn position(&self, name: &str) -> Result<Option<usize>, ServiceError> {
        for (idx, med) in self.medicines()?.iter().enumerate() {
            let found = med
                .as_object()
                .and_then(|m| m.get("name"))
                .ok_or_else(|| ServiceError::BadRecord(format!("entry {idx} has no `name`")))?;
            if found.as_str() == Some(name) {
                return Ok(Some(idx));
            }
        }
        Ok(None)
    }

    /// First matching record.
    pub fn find(&self, name: &str) -> Result<Option<Medicine>, ServiceError> {
        match self.position(name)? {
            Some(idx) => Ok(Some(serde_json::from_value(self.medicines()?[idx].clone())?)),
            None => Ok(None),
        }
    }

    /// Append without any existence check; duplicates are allowed.
    pub fn append(&mut self, medicine: Medicine) -> Result<(), ServiceError> {
        let record = serde_json::to_value(medicine)?;
        self.medicines_mut()?.push(record);
        Ok(())
    }

    /// Replace the price of the first match only. Returns whether one was found.
    pub fn reprice_first(&mut self, name: &str, price: Price) -> Result<bool, ServiceError> {
        let Some(idx) = self.position(name)? else {
            return Ok(false);
        };
        if let Some(record) = self.medicines_mut()?[idx].as_object_mut() {
            record.insert("price".into(), price.to_value());
        }
        Ok(true)
    }

    /// Remove the first match only.
    pub fn remove_first(&mut self, name: &str) -> Result<Option<Medicine>, ServiceError> {
        let Some(idx) = self.position(name)? else {
            return Ok(None);
        };
        let removed = self.medicines_mut()?.remove(idx);
        Ok(Some(serde_json::from_value(removed)?))
    }
}

/// Lenient view of the document used by the average-price report.
///
/// Only `price` is looked at; records with a missing name or a bad price
/// do not fail the parse.
#[derive(Debug, Default, Deserialize)]
pub struct PriceSheet {
    #[serde(default)]
    pub medicines: Vec<PricedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PricedEntry {
    #[serde(default)]
    pub price: Option<Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AveragePrice {
    pub average_price: Option<f64>,
    pub count: usize,
}

// Booleans count as 0/1, like any integer-typed price.
fn numeric(price: &Value) -> Option<f64> {
    match price {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

impl PriceSheet {
    /// Mean of the numeric prices, rounded to 2 decimals. Strings, nulls,
    /// containers and missing prices are skipped.
    pub fn average(&self) -> AveragePrice {
        let prices: Vec<f64> = self
            .medicines
            .iter()
            .filter_map(|entry| entry.price.as_ref().and_then(numeric))
            .collect();
        if prices.is_empty() {
            return AveragePrice { average_price: None, count: 0 };
        }
        let mean = prices.iter().sum::<f64>() / prices.len() as f64;
        AveragePrice { average_price: Some(round2(mean)), count: prices.len() }
    }
}

// Fixed-precision formatting rounds the exact binary value half-to-even.
fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}
