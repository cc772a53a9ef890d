use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::product::{Product, Statistics};
use crate::tools::pricing::Discount;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// One output per tool family. Untagged so the wire shape stays flat:
/// a product list serializes as an array, a soft error as `{"error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Products(Vec<Product>),
    Product(Product),
    Statistics(Statistics),
    Discount(Discount),
    Deleted(DeleteOutcome),
    Text(String),
    Error(SoftError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftError {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
}

impl ToolOutput {
    pub fn error(message: impl Into<String>) -> Self {
        ToolOutput::Error(SoftError {
            error: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutput::Error(_))
    }
}
