use std::collections::HashSet;

use serde::Deserialize;

use crate::error::AppError;
use crate::models::product::Product;
use crate::store::sqlite::SqliteStore;

const DEFAULTS_JSON: &str = include_str!("../assets/defaults.json");

#[derive(Debug, Deserialize)]
struct SeedDefaults {
    products: Vec<Product>,
}

pub fn seed_if_empty(store: &SqliteStore) -> Result<bool, AppError> {
    if !store.is_empty()? {
        return Ok(false);
    }

    let parsed: SeedDefaults = serde_json::from_str(DEFAULTS_JSON)
        .map_err(|e| AppError::Message(format!("Invalid defaults.json: {e}")))?;

    let ids: HashSet<i64> = parsed.products.iter().map(|p| p.id).collect();
    if ids.len() != parsed.products.len() {
        return Err(AppError::Message(
            "defaults.json contains duplicate product ids".to_string(),
        ));
    }

    for product in parsed.products.iter() {
        if product.id < 1 {
            return Err(AppError::Message(format!(
                "defaults.json product '{}' has an invalid id",
                product.name
            )));
        }
        if product.price < 0.0 {
            return Err(AppError::Message(format!(
                "defaults.json product '{}' has a negative price",
                product.name
            )));
        }
        store.insert_with_id(product)?;
    }

    Ok(true)
}
