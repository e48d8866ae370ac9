//! What the page shows, derived fresh from state and URL on every call.

use crate::cron::{example_placeholder, CronWorkflow};
use crate::error::PageError;
use crate::navigation::routes::detail_route;
use crate::page::CronWorkflowListPage;
use chrono::{DateTime, Utc};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub namespace: String,
    pub body: ListBody,
    pub panel: PanelView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListBody {
    Loading,
    Empty,
    Rows(Vec<CronWorkflowRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CronWorkflowRow {
    /// `namespace/name`
    pub key: String,
    pub name: String,
    pub namespace: String,
    pub schedule: String,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub detail_route: String,
}

impl From<&CronWorkflow> for CronWorkflowRow {
    fn from(wf: &CronWorkflow) -> Self {
        Self {
            key: wf.key(),
            name: wf.metadata.name.clone(),
            namespace: wf.metadata.namespace.clone(),
            schedule: wf.spec.schedule.clone(),
            creation_timestamp: wf.metadata.creation_timestamp,
            detail_route: detail_route(&wf.metadata.namespace, &wf.metadata.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Closed,
    Open {
        /// Parsed `new` parameter.
        seed: serde_json::Value,
        /// Example document for the active namespace.
        placeholder: String,
        error: Option<String>,
    },
}

impl CronWorkflowListPage {
    /// Current view, or the page-level error if one has been recorded.
    pub fn view(&self) -> Result<PageView, PageError> {
        if let Some(error) = self.error() {
            return Err(error);
        }

        let url = self.url_state();
        let namespace = url.namespace();
        let draft = url.draft_input();
        let panel_error = self.panel_error_while(draft.is_some());

        let state = self.state.read();
        let body = match state.items {
            None => ListBody::Loading,
            Some(ref items) if items.is_empty() => ListBody::Empty,
            Some(ref items) => ListBody::Rows(items.iter().map(CronWorkflowRow::from).collect()),
        };

        let panel = match draft {
            None => PanelView::Closed,
            Some(seed) => PanelView::Open {
                seed,
                placeholder: example_placeholder(&namespace),
                error: panel_error,
            },
        };

        Ok(PageView {
            namespace,
            body,
            panel,
        })
    }
}

/// RFC 3339 time plus its age relative to `now`, e.g. `2020-01-01T00:00:00Z (5m ago)`.
pub fn format_timestamp(ts: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(ts) = ts else {
        return "-".to_string();
    };

    let secs = (now - ts).num_seconds();
    let age = match secs {
        s if s < 0 => "in the future".to_string(),
        s if s < 60 => format!("{}s ago", s),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86400 => format!("{}h ago", s / 3600),
        s => format!("{}d ago", s / 86400),
    };
    format!("{} ({})", ts.format("%Y-%m-%dT%H:%M:%SZ"), age)
}

/// Plain-text rendering of a page view.
pub fn render_text(view: &PageView, docs_url: &str) -> String {
    let mut out = String::new();
    let scope = if view.namespace.is_empty() {
        "all namespaces"
    } else {
        view.namespace.as_str()
    };
    let _ = writeln!(out, "Cron Workflows ({})", scope);
    let _ = writeln!(out);

    match view.body {
        ListBody::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        ListBody::Empty => {
            let _ = writeln!(out, "No cron workflows");
            let _ = writeln!(out, "You can create new cron workflows here or using the CLI.");
            let _ = writeln!(out, "Learn more: {}", docs_url);
        }
        ListBody::Rows(ref rows) => {
            let now = Utc::now();
            let name_w = column_width("NAME", rows.iter().map(|r| r.name.as_str()));
            let ns_w = column_width("NAMESPACE", rows.iter().map(|r| r.namespace.as_str()));
            let sched_w = column_width("SCHEDULE", rows.iter().map(|r| r.schedule.as_str()));

            let _ = writeln!(
                out,
                "{:name_w$}  {:ns_w$}  {:sched_w$}  CREATED",
                "NAME", "NAMESPACE", "SCHEDULE"
            );
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:name_w$}  {:ns_w$}  {:sched_w$}  {}",
                    row.name,
                    row.namespace,
                    row.schedule,
                    format_timestamp(row.creation_timestamp, now)
                );
            }
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Cron workflows are workflows that run on a preset schedule. Learn more: {}",
                docs_url
            );
        }
    }

    if let PanelView::Open { ref error, .. } = view.panel {
        let _ = writeln!(out);
        let _ = writeln!(out, "[Create Cron Workflow]");
        if let Some(error) = error {
            let _ = writeln!(out, "Error: {}", error);
        }
    }

    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    // Padding in `{:w$}` counts chars, not bytes.
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
}
