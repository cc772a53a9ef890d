pub mod definition;
pub mod executor;
pub mod pricing;

use serde_json::json;

use crate::tools::definition::ToolDefinition;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "list_products".to_string(),
            description: "List all products, optionally filtered by category.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "category": { "type": "string", "description": "Category name filter (optional)." } },
                "required": []
            }),
        },
        ToolDefinition {
            name: "get_product".to_string(),
            description: "Get a product by its ID.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "product_id": { "type": "integer", "minimum": 1 } },
                "required": ["product_id"]
            }),
        },
        ToolDefinition {
            name: "add_product".to_string(),
            description: "Add a new product to the catalog.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "price": { "type": "number", "minimum": 0 },
                    "category": { "type": "string" },
                    "in_stock": { "type": "boolean" }
                },
                "required": ["name", "price", "category"]
            }),
        },
        ToolDefinition {
            name: "update_product".to_string(),
            description: "Update fields of an existing product.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "product_id": { "type": "integer", "minimum": 1 },
                    "name": { "type": "string" },
                    "price": { "type": "number", "minimum": 0 },
                    "category": { "type": "string" },
                    "in_stock": { "type": "boolean" }
                },
                "required": ["product_id"]
            }),
        },
        ToolDefinition {
            name: "delete_product".to_string(),
            description: "Delete a product by its ID.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "product_id": { "type": "integer", "minimum": 1 } },
                "required": ["product_id"]
            }),
        },
        ToolDefinition {
            name: "get_statistics".to_string(),
            description: "Get catalog statistics: counts, average price, category breakdown.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        ToolDefinition {
            name: "calculate_discount".to_string(),
            description: "Calculate a discounted price from a preceding product lookup.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "percent": { "type": "number", "minimum": 0, "maximum": 100 } },
                "required": ["percent"]
            }),
        },
        ToolDefinition {
            name: "format_price".to_string(),
            description: "Format a numeric amount as a display string.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": { "amount": { "type": "number" } },
                "required": ["amount"]
            }),
        },
    ]
}
