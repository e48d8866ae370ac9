//! reqwest client for the workflow server's cron workflow endpoints.

use crate::config::ServerConfig;
use crate::cron::{CreateCronWorkflowRequest, CronWorkflow, CronWorkflowList};
use crate::error::{CronWfError, Result};
use crate::service::CronWorkflowService;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_PREFIX: &str = "api/v1/cron-workflows";

pub struct HttpCronWorkflowService {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpCronWorkflowService {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn endpoint(&self, namespace: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, namespace)
    }

    /// Attach the configured token. It is sent verbatim, so it carries its own
    /// scheme (e.g. `Bearer ...`).
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.auth_token {
            Some(ref token) => req.header(reqwest::header::AUTHORIZATION, token),
            None => req,
        }
    }
}

/// Turn a response into `T`, mapping non-2xx statuses to `CronWfError::Api`.
async fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);
        return Err(CronWfError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| CronWfError::Decode(e.to_string()))
}

#[async_trait]
impl CronWorkflowService for HttpCronWorkflowService {
    async fn list(&self, namespace: &str) -> Result<Vec<CronWorkflow>> {
        let url = self.endpoint(namespace);
        tracing::debug!("GET {}", url);
        let res = self.authorize(self.client.get(&url)).send().await?;
        let list: CronWorkflowList = decode(res).await?;
        Ok(list.items.unwrap_or_default())
    }

    async fn create(
        &self,
        cron_workflow: serde_json::Value,
        namespace: &str,
    ) -> Result<CronWorkflow> {
        let url = self.endpoint(namespace);
        tracing::debug!("POST {}", url);
        let body = CreateCronWorkflowRequest {
            namespace,
            cron_workflow: &cron_workflow,
        };
        let res = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await?;
        decode(res).await
    }
}
