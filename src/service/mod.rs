//! Remote cron workflow API: the collaborator contract and its HTTP client.

mod http;

pub use http::HttpCronWorkflowService;

use crate::cron::CronWorkflow;
use crate::error::Result;
use async_trait::async_trait;

/// List and create operations over the cron workflow resource.
#[async_trait]
pub trait CronWorkflowService: Send + Sync {
    /// List cron workflows in `namespace`; an empty namespace means all of them.
    /// Order is whatever the server returns.
    async fn list(&self, namespace: &str) -> Result<Vec<CronWorkflow>>;

    /// Create the document `cron_workflow` in `namespace` and return the stored
    /// resource, including server-assigned fields. The document is sent as
    /// written; checking its structure is the server's job.
    async fn create(
        &self,
        cron_workflow: serde_json::Value,
        namespace: &str,
    ) -> Result<CronWorkflow>;
}
