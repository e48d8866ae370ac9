//! Cron workflow data structures and serialization.
//!
//! Only the fields the list shows are typed. Everything else is carried as
//! JSON in `extra`, and a displayed field of the wrong type decodes to its
//! default, so one odd resource never fails a whole list.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Untyped JSON object fields.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// A workflow definition paired with a recurring schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CronWorkflow {
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "lenient")]
    pub spec: CronWorkflowSpec,
    /// `apiVersion`, `kind`, `status` and anything else, passed through untouched.
    #[serde(flatten)]
    pub extra: Extra,
}

impl CronWorkflow {
    /// Row key and identity: `namespace/name`.
    pub fn key(&self) -> String {
        format!("{}/{}", self.metadata.namespace, self.metadata.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CronWorkflowSpec {
    /// Schedule expression, e.g. `*/5 * * * *`. Not interpreted here.
    #[serde(default, deserialize_with = "lenient")]
    pub schedule: String,
    /// `workflowSpec`, `concurrencyPolicy`, `suspend` and the rest.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Decode `T`, falling back to its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// List response envelope. The server sends `null` items for an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CronWorkflowList {
    #[serde(default)]
    pub items: Option<Vec<CronWorkflow>>,
}

/// Create request body. The resource is the user's document as written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCronWorkflowRequest<'a> {
    pub namespace: &'a str,
    pub cron_workflow: &'a serde_json::Value,
}
