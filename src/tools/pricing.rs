use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::product::{Product, ProductView};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub original_price: f64,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

pub fn calculate_discount(price: f64, percent: f64) -> Result<Discount, AppError> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(AppError::Message(
            "Discount percentage must be between 0 and 100".to_string(),
        ));
    }

    let discount_amount = price * (percent / 100.0);
    let final_price = price - discount_amount;

    Ok(Discount {
        original_price: price,
        discount_percent: percent,
        discount_amount: round2(discount_amount),
        final_price: round2(final_price),
        product_name: None,
    })
}

pub fn format_price(amount: f64) -> String {
    format!("{amount}")
}

pub fn product_list_view(products: &[Product]) -> Vec<ProductView> {
    products
        .iter()
        .map(|p| ProductView {
            id: p.id,
            name: p.name.clone(),
            price: p.price,
            category: p.category.clone(),
            in_stock: p.in_stock,
        })
        .collect()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
