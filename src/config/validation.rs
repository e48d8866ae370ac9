use crate::config::schema::AppConfig;
use crate::error::{CronWfError, Result};
use url::Url;

const MAX_NAMESPACE_LEN: usize = 63;

/// Validate a loaded configuration before building clients from it
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let url = Url::parse(&config.server.base_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(CronWfError::Validation(format!(
            "Invalid server URL: {}. Must start with http:// or https://",
            config.server.base_url
        )));
    }

    if config.server.request_timeout_secs == 0 {
        return Err(CronWfError::Validation(
            "Request timeout must be greater than zero".to_string(),
        ));
    }

    if !config.ui.base_href.starts_with('/') {
        return Err(CronWfError::Validation(format!(
            "Base href {:?} must start with '/'",
            config.ui.base_href
        )));
    }

    validate_namespace(&config.ui.default_namespace)
}

/// Validate a namespace filter value. Empty means all namespaces; anything else
/// must be a DNS-1123 label.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Ok(());
    }

    if namespace.len() > MAX_NAMESPACE_LEN {
        return Err(CronWfError::Validation(format!(
            "Namespace {:?} is longer than {} characters",
            namespace, MAX_NAMESPACE_LEN
        )));
    }

    let valid_chars = namespace
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let alnum = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !valid_chars || !alnum(namespace.chars().next()) || !alnum(namespace.chars().last()) {
        return Err(CronWfError::Validation(format!(
            "Invalid namespace {:?}: use lowercase letters, digits and '-', starting and ending with a letter or digit",
            namespace
        )));
    }

    Ok(())
}
