use crate::config::AppConfig;
use crate::error::Result;
use crate::navigation::routes::{ui_url, LIST_ROUTE};
use crate::navigation::query::NAMESPACE_PARAM;
use crate::navigation::{MemoryNavigator, Navigator, QueryParams};
use crate::page::CronWorkflowListPage;
use crate::service::{CronWorkflowService, HttpCronWorkflowService};
use parking_lot::RwLock;
use std::sync::Arc;

/// Application global state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<AppConfig>>,
    pub service: Arc<dyn CronWorkflowService>,
    pub navigator: Arc<MemoryNavigator>,
}

impl AppState {
    /// State talking to the configured workflow server, starting on the list route.
    pub fn new(config: AppConfig) -> Result<Self> {
        let service = Arc::new(HttpCronWorkflowService::new(&config.server)?);
        Ok(Self::with_service(config, service))
    }

    pub fn with_service(config: AppConfig, service: Arc<dyn CronWorkflowService>) -> Self {
        let mut query = QueryParams::default();
        if !config.ui.default_namespace.is_empty() {
            query.set(NAMESPACE_PARAM, &config.ui.default_namespace);
        }
        let initial = if query.is_empty() {
            LIST_ROUTE.to_string()
        } else {
            format!("{}?{}", LIST_ROUTE, query)
        };

        Self {
            config: Arc::new(RwLock::new(config)),
            service,
            navigator: Arc::new(MemoryNavigator::new(&initial)),
        }
    }

    /// A fresh list page bound to this state's service and navigator.
    pub fn list_page(&self) -> CronWorkflowListPage {
        let nav: Arc<dyn Navigator> = self.navigator.clone();
        CronWorkflowListPage::new(Arc::clone(&self.service), nav)
    }

    /// Current location as an absolute UI URL.
    pub fn current_url(&self) -> String {
        let base_href = self.config.read().ui.base_href.clone();
        ui_url(&base_href, &self.navigator.location().to_string())
    }
}
