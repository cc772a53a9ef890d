use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::tools::definition::ToolCall;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub tool_calls: Vec<ToolCall>,
    pub response_template: String,
}

type Handler = fn(&IntentClassifier, &Captures, &str) -> Result<ParseResult, AppError>;

/// Deterministic rule-table classifier standing in for a language model.
/// Rules are tried in order against the lower-cased query; the first match
/// wins, so the ordering below is load-bearing for disambiguation.
pub struct IntentClassifier {
    rules: Vec<(Regex, Handler)>,
    add_name: Regex,
    add_price: Regex,
    add_category: Regex,
}

impl IntentClassifier {
    pub fn new() -> Result<Self, AppError> {
        // "add product" shares keywords with the statistics and list rules and
        // must be tried before them.
        let table: Vec<(&str, Handler)> = vec![
            (
                r"(add|create)\w*\s*.*(product|item)",
                Self::parse_add_product,
            ),
            (
                r"(statistic|average price|how many (products|items))",
                Self::parse_statistics,
            ),
            (
                r"(\d+)\s*%.*?\bid\s*[=:]?\s*(\d+)",
                Self::parse_discount,
            ),
            (
                r"(show|find|get|info(rmation)?\s+about|give)\s+(me\s+)?(the\s+)?(product|item)\w*\s+id\s*[=:]?\s*(?P<id>\d+)",
                Self::parse_get_product,
            ),
            (
                r"(product|item)\s+id\s*[=:]?\s*(?P<id>\d+)",
                Self::parse_get_product,
            ),
            (
                r#"(show|list|all)\s*(product|item)\w*\s*(in|from)?\s*(the\s+)?category\s+["']?(?P<category>\w+)["']?"#,
                Self::parse_list_with_category,
            ),
            (
                r#"categor\w*\s+["']?(?P<category>\w+)["']?"#,
                Self::parse_category,
            ),
            (
                r"(show|list|all|display)\s*(product|item)\w*",
                Self::parse_list_all,
            ),
        ];

        let mut rules = Vec::with_capacity(table.len());
        for (pattern, handler) in table {
            rules.push((compile(pattern)?, handler));
        }

        Ok(Self {
            rules,
            add_name: compile(r"(?i)(?:product|item)[:\s]+([^,]+)")?,
            add_price: compile(r"(?i)price\s*[=:]*\s*(\d+)")?,
            add_category: compile(r"(?i)category\s*[=:]*\s*(\w+)")?,
        })
    }

    /// Total: every query classifies, falling back to a list-all intent.
    pub fn parse(&self, query: &str) -> Result<ParseResult, AppError> {
        let lowered = query.to_lowercase();

        for (pattern, handler) in &self.rules {
            if let Some(caps) = pattern.captures(&lowered) {
                return handler(self, &caps, query);
            }
        }

        Ok(ParseResult {
            tool_calls: vec![ToolCall {
                name: "list_products".to_string(),
                arguments: json!({}),
            }],
            response_template: "Here is the product list:\n{result}".to_string(),
        })
    }

    fn parse_statistics(&self, _caps: &Captures, _query: &str) -> Result<ParseResult, AppError> {
        Ok(ParseResult {
            tool_calls: vec![ToolCall {
                name: "get_statistics".to_string(),
                arguments: json!({}),
            }],
            response_template: "Product statistics:\n{result}".to_string(),
        })
    }

    fn parse_discount(&self, caps: &Captures, _query: &str) -> Result<ParseResult, AppError> {
        let percent = parse_number::<f64>(&caps[1])?;
        let product_id = parse_number::<i64>(&caps[2])?;

        Ok(ParseResult {
            tool_calls: vec![
                ToolCall {
                    name: "get_product".to_string(),
                    arguments: json!({ "product_id": product_id }),
                },
                ToolCall {
                    name: "calculate_discount".to_string(),
                    arguments: json!({ "percent": percent }),
                },
            ],
            response_template: "Discount calculation:\n{result}".to_string(),
        })
    }

    fn parse_get_product(&self, caps: &Captures, _query: &str) -> Result<ParseResult, AppError> {
        let product_id = parse_number::<i64>(&caps["id"])?;

        Ok(ParseResult {
            tool_calls: vec![ToolCall {
                name: "get_product".to_string(),
                arguments: json!({ "product_id": product_id }),
            }],
            response_template: "Product details:\n{result}".to_string(),
        })
    }

    fn parse_list_with_category(&self, caps: &Captures, _query: &str) -> Result<ParseResult, AppError> {
        let category = &caps["category"];

        Ok(ParseResult {
            tool_calls: vec![ToolCall {
                name: "list_products".to_string(),
                arguments: json!({ "category": category }),
            }],
            response_template: format!("Products in category '{category}':\n{{result}}"),
        })
    }

    fn parse_category(&self, caps: &Captures, query: &str) -> Result<ParseResult, AppError> {
        self.parse_list_with_category(caps, query)
    }

    fn parse_add_product(&self, _caps: &Captures, query: &str) -> Result<ParseResult, AppError> {
        // Field extraction runs against the original-case query so product
        // names keep their capitalization.
        let name = match self.add_name.captures(query).and_then(|c| c.get(1)) {
            Some(m) => m.as_str().trim().to_string(),
            None => "New product".to_string(),
        };

        let price = match self.add_price.captures(query).and_then(|c| c.get(1)) {
            Some(m) => parse_number::<f64>(m.as_str())?,
            None => 0.0,
        };

        let category = match self.add_category.captures(query).and_then(|c| c.get(1)) {
            Some(m) => m.as_str().to_string(),
            None => "Uncategorized".to_string(),
        };

        let in_stock = !query.to_lowercase().contains("out of stock");

        Ok(ParseResult {
            tool_calls: vec![ToolCall {
                name: "add_product".to_string(),
                arguments: json!({
                    "name": name,
                    "price": price,
                    "category": category,
                    "in_stock": in_stock
                }),
            }],
            response_template: "Product added:\n{result}".to_string(),
        })
    }

    fn parse_list_all(&self, _caps: &Captures, _query: &str) -> Result<ParseResult, AppError> {
        Ok(ParseResult {
            tool_calls: vec![ToolCall {
                name: "list_products".to_string(),
                arguments: json!({}),
            }],
            response_template: "All products:\n{result}".to_string(),
        })
    }
}

pub fn render_template(template: &str, result: &str) -> String {
    template.replace("{result}", result)
}

fn compile(pattern: &str) -> Result<Regex, AppError> {
    Regex::new(pattern).map_err(|e| AppError::Message(e.to_string()))
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| AppError::Message(format!("Failed to parse number '{raw}': {e}")))
}
