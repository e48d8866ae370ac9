use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workflow server connection
    #[serde(default)]
    pub server: ServerConfig,

    /// Page settings
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Workflow server base URL (e.g., "https://localhost:2746")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value for the Authorization header, including its scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Prefix every UI route is mounted under
    #[serde(default = "default_base_href")]
    pub base_href: String,

    /// Namespace used when the URL carries none; empty means all namespaces
    #[serde(default)]
    pub default_namespace: String,

    /// "Learn more" link shown on the list page
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_href: default_base_href(),
            default_namespace: String::new(),
            docs_url: default_docs_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:2746".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_base_href() -> String {
    "/".to_string()
}

fn default_docs_url() -> String {
    "https://github.com/argoproj/argo/blob/master/docs/cron-workflows.md".to_string()
}
