use serde_json::{json, Value};

use crate::classifier::IntentClassifier;
use crate::orchestration::state::{PipelinePhase, RequestState};
use crate::tools::definition::ToolOutput;
use crate::tools::executor::ToolExecutor;
use crate::tools::pricing::product_list_view;

/// Parse -> Execute -> Format -> Done. Linear, no branching back. Every
/// failure mode ends up inside `state.response`; nothing propagates out.
pub fn run_pipeline(classifier: &IntentClassifier, executor: &ToolExecutor, state: &mut RequestState) {
    state.phase = PipelinePhase::Parse;
    parse_request(classifier, state);

    state.phase = PipelinePhase::Execute;
    execute_tools(executor, state);

    state.phase = PipelinePhase::Format;
    format_response(state);

    state.phase = PipelinePhase::Done;
}

fn parse_request(classifier: &IntentClassifier, state: &mut RequestState) {
    match classifier.parse(&state.query) {
        Ok(parse_result) => {
            state.tools_used = parse_result
                .tool_calls
                .iter()
                .map(|tc| tc.name.clone())
                .collect();
            tracing::debug!(tools = ?state.tools_used, "query classified");
            state.parse_result = Some(parse_result);
        }
        Err(e) => {
            state.error = Some(e.to_string());
        }
    }
}

fn execute_tools(executor: &ToolExecutor, state: &mut RequestState) {
    if state.error.is_some() {
        return;
    }

    let Some(parse_result) = state.parse_result.clone() else {
        state.error = Some("No parse result".to_string());
        return;
    };

    for call in &parse_result.tool_calls {
        let output = executor.execute(call, &state.tool_results);
        if output.is_error() {
            tracing::debug!(tool = %call.name, "tool returned a soft error");
        }
        state.set_result(&call.name, output);
    }
}

fn format_response(state: &mut RequestState) {
    if let Some(error) = &state.error {
        state.response = json!({ "error": error });
        return;
    }

    if state.tool_results.is_empty() {
        state.response = json!({ "error": "Failed to process the request" });
        return;
    }

    let mut response = serde_json::Map::new();
    for (name, output) in &state.tool_results {
        match (name.as_str(), output) {
            ("list_products", ToolOutput::Products(products)) => {
                response.insert("products".to_string(), json!(product_list_view(products)));
            }
            ("list_products", ToolOutput::Error(e)) => {
                response.insert("error".to_string(), json!(e.error));
            }
            ("get_product", ToolOutput::Product(product)) => {
                response.insert("product".to_string(), json!(product));
            }
            ("get_product", ToolOutput::Error(e)) => {
                response.insert("error".to_string(), json!(e.error));
            }
            ("get_statistics", ToolOutput::Statistics(stats)) => {
                response.insert("statistics".to_string(), json!(stats));
            }
            ("get_statistics", ToolOutput::Error(e)) => {
                response.insert("error".to_string(), json!(e.error));
            }
            ("add_product", output) => {
                response.insert("added_product".to_string(), json!(output));
            }
            ("calculate_discount", output) => {
                response.insert("discount".to_string(), json!(output));
            }
            (_, output) => {
                response.insert(name.clone(), json!(output));
            }
        }
    }

    state.response = Value::Object(response);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Product;

    #[test]
    fn test_format_with_top_level_error() {
        let mut state = RequestState::new("test");
        state.error = Some("boom".to_string());
        format_response(&mut state);
        assert_eq!(state.response["error"], "boom");
    }

    #[test]
    fn test_format_with_no_results() {
        let mut state = RequestState::new("test");
        format_response(&mut state);
        assert_eq!(state.response["error"], "Failed to process the request");
    }

    #[test]
    fn test_format_maps_product_lookup_failure_to_error() {
        let mut state = RequestState::new("test");
        state.set_result("get_product", ToolOutput::error("Product with ID 9999 not found"));
        format_response(&mut state);
        assert!(state.response.get("product").is_none());
        assert_eq!(state.response["error"], "Product with ID 9999 not found");
    }

    #[test]
    fn test_format_maps_list_to_products_key() {
        let mut state = RequestState::new("test");
        state.set_result(
            "list_products",
            ToolOutput::Products(vec![Product {
                id: 1,
                name: "Test".to_string(),
                price: 10.0,
                category: "Misc".to_string(),
                in_stock: true,
            }]),
        );
        format_response(&mut state);
        let products = state.response["products"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["name"], "Test");
    }

    #[test]
    fn test_format_passes_unmapped_tools_through_verbatim() {
        let mut state = RequestState::new("test");
        state.set_result("format_price", ToolOutput::Text("42".to_string()));
        format_response(&mut state);
        assert_eq!(state.response["format_price"], "42");
    }
}
