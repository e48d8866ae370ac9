//! Create panel: Closed until `new` is in the URL, then submit or close.

use crate::cron::CronWorkflow;
use crate::error::{CronWfError, PageError};
use crate::navigation::routes::detail_route;
use crate::navigation::{HistoryMode, QueryPatch};
use crate::page::CronWorkflowListPage;
use std::sync::Arc;

impl CronWorkflowListPage {
    pub fn is_create_panel_open(&self) -> bool {
        self.url_state().draft_input().is_some()
    }

    pub fn open_create_panel(&self) {
        self.state.write().panel_error = None;
        self.url_state().open_create_panel();
    }

    pub fn close_create_panel(&self) {
        self.state.write().panel_error = None;
        self.url_state().close_create_panel();
    }

    /// Parse error shown in the panel. A panel closed by any navigation,
    /// including browser back, drops its error.
    pub fn panel_error(&self) -> Option<String> {
        self.panel_error_while(self.is_create_panel_open())
    }

    pub(super) fn panel_error_while(&self, open: bool) -> Option<String> {
        if open {
            return self.state.read().panel_error.clone();
        }
        let mut state = self.state.write();
        if state.panel_error.take().is_some() {
            tracing::debug!("Create panel closed, dropping its error");
        }
        None
    }

    /// Submit editor text as a new cron workflow.
    ///
    /// Text that is not JSON stays in the panel as a panel error and nothing is
    /// sent. Any JSON document is sent as written. A rejected create is a
    /// page-level error, like a failed load, and leaves the panel as it was.
    /// On success the page navigates to the created resource's detail route.
    pub async fn submit(&self, text: &str) -> Result<CronWorkflow, PageError> {
        let draft: serde_json::Value = match serde_json::from_str(text) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("Draft is not valid JSON: {}", e);
                self.state.write().panel_error = Some(e.to_string());
                return Err(Arc::new(CronWfError::DraftParse(e)));
            }
        };

        let namespace = draft
            .pointer("/metadata/namespace")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        tracing::info!(
            "Creating cron workflow {:?} in {:?}",
            draft.pointer("/metadata/name"),
            namespace
        );

        match self.service.create(draft, &namespace).await {
            Ok(created) => {
                self.state.write().panel_error = None;
                let route = detail_route(&created.metadata.namespace, &created.metadata.name);
                self.nav.goto(&route, &QueryPatch::new(), HistoryMode::Push);
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("Failed to create cron workflow: {}", e);
                let error = Arc::new(e);
                self.state.write().error = Some(error.clone());
                Err(error)
            }
        }
    }
}
