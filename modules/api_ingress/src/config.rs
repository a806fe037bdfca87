use serde::{Deserialize, Serialize};

/// HTTP ingress configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// Serve `/docs` and `/openapi.json`.
    #[serde(default = "default_enable_docs")]
    pub enable_docs: bool,
    #[serde(default)]
    pub cors_enabled: bool,
}

fn default_enable_docs() -> bool {
    true
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            enable_docs: true,
            cors_enabled: false,
        }
    }
}
