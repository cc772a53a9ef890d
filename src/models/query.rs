use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: Value,
    #[serde(default)]
    pub tools_used: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: default_status(),
            version: default_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub health: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "Product Agent API".to_string(),
            version: default_version(),
            health: "/health".to_string(),
        }
    }
}

fn default_status() -> String {
    "ok".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
