//! Cron workflow list page: state, list loading and namespace filtering.
//!
//! Filter and panel visibility live in the URL (see [`UrlState`]); only the
//! loaded items and errors are held here.

mod create;
pub mod view;

pub use view::{format_timestamp, render_text, CronWorkflowRow, ListBody, PageView, PanelView};

use crate::config::validate_namespace;
use crate::cron::CronWorkflow;
use crate::error::{PageError, Result};
use crate::navigation::{Navigator, UrlState};
use crate::service::CronWorkflowService;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// What the page has learned from the server.
#[derive(Debug, Default)]
pub struct PageState {
    /// `None` while loading.
    pub items: Option<Vec<CronWorkflow>>,
    /// Page-level failure. Once set the page only renders the error.
    pub error: Option<PageError>,
    /// Parse failure shown inside the create panel.
    pub panel_error: Option<String>,
}

pub struct CronWorkflowListPage {
    service: Arc<dyn CronWorkflowService>,
    nav: Arc<dyn Navigator>,
    state: RwLock<PageState>,
    /// Incremented per load; only the latest load may write `items`.
    generation: AtomicU64,
    mounted: AtomicBool,
    unmounted: AtomicBool,
}

impl CronWorkflowListPage {
    pub fn new(service: Arc<dyn CronWorkflowService>, nav: Arc<dyn Navigator>) -> Self {
        Self {
            service,
            nav,
            state: RwLock::new(PageState::default()),
            generation: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
            unmounted: AtomicBool::new(false),
        }
    }

    pub fn url_state(&self) -> UrlState<'_> {
        UrlState::new(self.nav.as_ref())
    }

    pub fn namespace(&self) -> String {
        self.url_state().namespace()
    }

    pub fn items(&self) -> Option<Vec<CronWorkflow>> {
        self.state.read().items.clone()
    }

    pub fn error(&self) -> Option<PageError> {
        self.state.read().error.clone()
    }

    /// Initial load. Runs once per page; later calls are ignored.
    pub async fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            tracing::warn!("Cron workflow list already mounted, skipping load");
            return;
        }
        self.load().await;
    }

    /// Stop accepting results from in-flight loads.
    pub fn unmount(&self) {
        self.unmounted.store(true, Ordering::SeqCst);
    }

    /// Filter by `namespace` and reload the list for it.
    pub async fn change_namespace(&self, namespace: &str) -> Result<()> {
        validate_namespace(namespace)?;
        self.url_state().set_namespace(namespace);
        self.load().await;
        Ok(())
    }

    async fn load(&self) {
        // Generation and namespace are taken together under the lock, so the
        // newest generation always carries the newest filter.
        let (generation, namespace) = {
            let mut state = self.state.write();
            state.items = None;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (generation, self.namespace())
        };

        tracing::info!("Loading cron workflows (namespace={:?})", namespace);
        let result = self.service.list(&namespace).await;

        let mut state = self.state.write();
        if self.unmounted.load(Ordering::SeqCst) {
            tracing::debug!("Page unmounted, dropping list for {:?}", namespace);
            return;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale list for {:?}", namespace);
            return;
        }

        match result {
            Ok(items) => {
                tracing::info!("Loaded {} cron workflows", items.len());
                state.items = Some(items);
            }
            Err(e) => {
                tracing::warn!("Failed to list cron workflows: {}", e);
                state.error = Some(Arc::new(e));
            }
        }
    }
}
