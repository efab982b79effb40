//! Load loan product catalogs
//!
//! Two sources are supported:
//! - JSON as returned by the products endpoint: either a bare array or the
//!   `{ "data": [...] }` envelope
//! - CSV with one product per row, for offline catalogs
//!
//! Products that break their own invariants are skipped with a warning so a
//! single bad row does not take the whole catalog down.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::data::flexible;
use super::{InterestType, LoanProduct};
use crate::error::{EstimatorError, Result};

/// CSV row layout
///
/// Numeric cells go through the same lenient parsing as the JSON catalog, so
/// a quoted `"50,000.00"` loads either way.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    #[serde(deserialize_with = "flexible::id")]
    id: u64,
    name: String,
    #[serde(deserialize_with = "flexible::number")]
    interest_rate: f64,
    #[serde(default)]
    interest_type: String,
    #[serde(deserialize_with = "flexible::number")]
    min_amount: f64,
    #[serde(deserialize_with = "flexible::number")]
    max_amount: f64,
    #[serde(deserialize_with = "flexible::months")]
    min_tenure_months: u32,
    #[serde(deserialize_with = "flexible::months")]
    max_tenure_months: u32,
    #[serde(default, deserialize_with = "flexible::number_or_zero")]
    processing_fee_percentage: f64,
}

impl From<ProductRecord> for LoanProduct {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            interest_rate: record.interest_rate,
            interest_type: InterestType::from_tag(&record.interest_type),
            min_amount: record.min_amount,
            max_amount: record.max_amount,
            min_tenure_months: record.min_tenure_months,
            max_tenure_months: record.max_tenure_months,
            processing_fee_percentage: record.processing_fee_percentage,
        }
    }
}

/// Load a product catalog, choosing the format from the file extension
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<LoanProduct>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let products = match extension.as_deref() {
        Some("json") => load_products_from_json_reader(BufReader::new(File::open(path)?))?,
        Some("csv") => load_products_from_csv_reader(BufReader::new(File::open(path)?))?,
        _ => {
            return Err(EstimatorError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };

    debug!("Loaded {} loan products from {}", products.len(), path.display());
    Ok(products)
}

/// Load products from a JSON reader (bare array or `data` envelope)
pub fn load_products_from_json_reader<R: Read>(reader: R) -> Result<Vec<LoanProduct>> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = match value {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Array(Vec::new())),
        other => other,
    };

    let products: Vec<LoanProduct> = serde_json::from_value(items)?;
    Ok(keep_valid(products))
}

/// Load products from a CSV reader with a header row
pub fn load_products_from_csv_reader<R: Read>(reader: R) -> Result<Vec<LoanProduct>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut products = Vec::new();
    for result in rdr.deserialize() {
        let record: ProductRecord = result?;
        products.push(LoanProduct::from(record));
    }
    Ok(keep_valid(products))
}

/// Look up a product by id
pub fn find_product(products: &[LoanProduct], id: u64) -> Result<&LoanProduct> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or(EstimatorError::ProductNotFound { id })
}

fn keep_valid(products: Vec<LoanProduct>) -> Vec<LoanProduct> {
    products
        .into_iter()
        .filter(|product| match product.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping loan product: {}", e);
                false
            }
        })
        .collect()
}
