use std::sync::Arc;

use serde_json::Value;

use crate::models::product::{ProductCreate, ProductUpdate};
use crate::store::Catalog;
use crate::tools::definition::{DeleteOutcome, ToolCall, ToolOutput};
use crate::tools::pricing;

pub struct ToolExecutor {
    catalog: Arc<dyn Catalog>,
}

impl ToolExecutor {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Runs a single call. `prior` holds the outputs of earlier calls from the
    /// same request; `calculate_discount` reads its price from there. Every
    /// failure, including a store fault, becomes a soft error output so the
    /// remaining calls still run.
    pub fn execute(&self, call: &ToolCall, prior: &[(String, ToolOutput)]) -> ToolOutput {
        match call.name.as_str() {
            "calculate_discount" => self.calculate_discount(&call.arguments, prior),
            "format_price" => {
                let Some(amount) = as_f64(&call.arguments, "amount") else {
                    return ToolOutput::error("Missing amount");
                };
                ToolOutput::Text(pricing::format_price(amount))
            }
            "list_products" => {
                let category = as_str(&call.arguments, "category");
                match self.catalog.list(category.as_deref()) {
                    Ok(products) => ToolOutput::Products(products),
                    Err(e) => ToolOutput::error(format!("Catalog store error: {e}")),
                }
            }
            "get_product" => {
                let Some(product_id) = as_i64(&call.arguments, "product_id") else {
                    return ToolOutput::error("Missing product_id");
                };
                match self.catalog.get(product_id) {
                    Ok(Some(product)) => ToolOutput::Product(product),
                    Ok(None) => {
                        ToolOutput::error(format!("Product with ID {product_id} not found"))
                    }
                    Err(e) => ToolOutput::error(format!("Catalog store error: {e}")),
                }
            }
            "add_product" => {
                let fields: ProductCreate = match serde_json::from_value(call.arguments.clone()) {
                    Ok(fields) => fields,
                    Err(e) => return ToolOutput::error(format!("Invalid add_product arguments: {e}")),
                };
                match self.catalog.create(fields) {
                    Ok(product) => ToolOutput::Product(product),
                    Err(e) => ToolOutput::error(format!("Catalog store error: {e}")),
                }
            }
            "update_product" => {
                let Some(product_id) = as_i64(&call.arguments, "product_id") else {
                    return ToolOutput::error("Missing product_id");
                };
                let fields: ProductUpdate = match serde_json::from_value(call.arguments.clone()) {
                    Ok(fields) => fields,
                    Err(e) => {
                        return ToolOutput::error(format!("Invalid update_product arguments: {e}"))
                    }
                };
                match self.catalog.update(product_id, fields) {
                    Ok(Some(product)) => ToolOutput::Product(product),
                    Ok(None) => {
                        ToolOutput::error(format!("Product with ID {product_id} not found"))
                    }
                    Err(e) => ToolOutput::error(format!("Catalog store error: {e}")),
                }
            }
            "delete_product" => {
                let Some(product_id) = as_i64(&call.arguments, "product_id") else {
                    return ToolOutput::error("Missing product_id");
                };
                match self.catalog.delete(product_id) {
                    Ok(true) => ToolOutput::Deleted(DeleteOutcome {
                        success: true,
                        message: format!("Product {product_id} deleted"),
                    }),
                    Ok(false) => {
                        ToolOutput::error(format!("Product with ID {product_id} not found"))
                    }
                    Err(e) => ToolOutput::error(format!("Catalog store error: {e}")),
                }
            }
            "get_statistics" => match self.catalog.statistics() {
                Ok(stats) => ToolOutput::Statistics(stats),
                Err(e) => ToolOutput::error(format!("Catalog store error: {e}")),
            },
            _ => ToolOutput::error(format!("Unknown tool: {}", call.name)),
        }
    }

    fn calculate_discount(&self, args: &Value, prior: &[(String, ToolOutput)]) -> ToolOutput {
        let Some(percent) = as_f64(args, "percent") else {
            return ToolOutput::error("Missing percent");
        };

        let product = prior.iter().rev().find_map(|(name, output)| {
            match (name.as_str(), output) {
                ("get_product", ToolOutput::Product(p)) => Some(p),
                _ => None,
            }
        });
        let Some(product) = product else {
            return ToolOutput::error("Product not found for discount calculation");
        };

        match pricing::calculate_discount(product.price, percent) {
            Ok(mut discount) => {
                discount.product_name = Some(product.name.clone());
                ToolOutput::Discount(discount)
            }
            Err(e) => ToolOutput::error(e.to_string()),
        }
    }
}

fn as_str(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn as_f64(args: &Value, key: &str) -> Option<f64> {
    args.get(key).and_then(|v| v.as_f64())
}

fn as_i64(args: &Value, key: &str) -> Option<i64> {
    args.get(key).and_then(|v| v.as_i64())
}
