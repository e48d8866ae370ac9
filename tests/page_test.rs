//! Page controller tests: URL-derived state, list loading, and the create flow,
//! driven through a fake cron workflow service and the in-memory navigator.

use async_trait::async_trait;
use cronwf_lib::cron::CronWorkflow;
use cronwf_lib::error::{CronWfError, Result};
use cronwf_lib::navigation::{MemoryNavigator, Navigator};
use cronwf_lib::page::{CronWorkflowListPage, ListBody, PanelView};
use cronwf_lib::service::CronWorkflowService;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

#[derive(Default)]
struct FakeService {
    lists: Mutex<HashMap<String, Vec<CronWorkflow>>>,
    list_failure: Mutex<Option<(u16, String)>>,
    create_failure: Mutex<Option<(u16, String)>>,
    /// Server-side rename applied to created resources.
    created_name: Mutex<Option<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    list_calls: Mutex<Vec<String>>,
    create_calls: Mutex<Vec<(serde_json::Value, String)>>,
    /// Times `list` yields to the scheduler before answering.
    list_yields: usize,
}

impl FakeService {
    fn with_list(namespace: &str, items: Vec<CronWorkflow>) -> Self {
        let svc = Self::default();
        svc.lists.lock().insert(namespace.to_string(), items);
        svc
    }

    /// Hold `list(namespace)` until the returned sender fires.
    fn gate(&self, namespace: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(namespace.to_string(), rx);
        tx
    }

    fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().clone()
    }
}

#[async_trait]
impl CronWorkflowService for FakeService {
    async fn list(&self, namespace: &str) -> Result<Vec<CronWorkflow>> {
        self.list_calls.lock().push(namespace.to_string());
        for _ in 0..self.list_yields {
            tokio::task::yield_now().await;
        }
        let gate = self.gates.lock().remove(namespace);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some((status, message)) = self.list_failure.lock().clone() {
            return Err(CronWfError::Api { status, message });
        }
        Ok(self.lists.lock().get(namespace).cloned().unwrap_or_default())
    }

    async fn create(
        &self,
        cron_workflow: serde_json::Value,
        namespace: &str,
    ) -> Result<CronWorkflow> {
        self.create_calls
            .lock()
            .push((cron_workflow.clone(), namespace.to_string()));
        if let Some((status, message)) = self.create_failure.lock().clone() {
            return Err(CronWfError::Api { status, message });
        }
        let mut created: CronWorkflow = serde_json::from_value(cron_workflow)
            .map_err(|e| CronWfError::Decode(e.to_string()))?;
        if let Some(name) = self.created_name.lock().clone() {
            created.metadata.name = name;
        }
        Ok(created)
    }
}

fn workflow(namespace: &str, name: &str) -> CronWorkflow {
    let mut wf = CronWorkflow::default();
    wf.metadata.namespace = namespace.to_string();
    wf.metadata.name = name.to_string();
    wf.spec.schedule = "0 * * * *".to_string();
    wf
}

fn make_page(
    svc: FakeService,
    url: &str,
) -> (Arc<FakeService>, Arc<MemoryNavigator>, Arc<CronWorkflowListPage>) {
    let svc = Arc::new(svc);
    let nav = Arc::new(MemoryNavigator::new(url));
    let page = CronWorkflowListPage::new(svc.clone(), nav.clone());
    (svc, nav, Arc::new(page))
}

fn row_keys(page: &CronWorkflowListPage) -> Vec<String> {
    match page.view().unwrap().body {
        ListBody::Rows(rows) => rows.into_iter().map(|r| r.key).collect(),
        other => panic!("expected rows, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// URL-derived state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_namespace_defaults_to_all() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    assert_eq!(page.namespace(), "");
    page.mount().await;
    assert_eq!(svc.list_calls(), vec![String::new()]);
    assert_eq!(page.view().unwrap().namespace, "");
}

#[tokio::test]
async fn test_loads_namespace_from_url() {
    let svc = FakeService::with_list("argo", vec![workflow("argo", "nightly")]);
    let (svc, _nav, page) = make_page(svc, "cron-workflows?namespace=argo");
    page.mount().await;
    assert_eq!(svc.list_calls(), vec!["argo".to_string()]);
    assert_eq!(row_keys(&page), vec!["argo/nightly"]);
}

#[tokio::test]
async fn test_deep_link_opens_panel_with_seed() {
    let (_svc, _nav, page) = make_page(
        FakeService::default(),
        "cron-workflows?namespace=argo&new=%7B%22metadata%22%3A%7B%22name%22%3A%22x%22%7D%7D",
    );
    assert!(page.is_create_panel_open());
    match page.view().unwrap().panel {
        PanelView::Open {
            seed,
            placeholder,
            error,
        } => {
            assert_eq!(seed, serde_json::json!({"metadata": {"name": "x"}}));
            assert!(placeholder.contains("namespace: argo"));
            assert!(error.is_none());
        }
        PanelView::Closed => panic!("panel should be open"),
    }
}

#[tokio::test]
async fn test_unparseable_new_param_keeps_panel_closed() {
    let (_svc, _nav, page) = make_page(FakeService::default(), "cron-workflows?new=not-json");
    assert!(!page.is_create_panel_open());
    assert_eq!(page.view().unwrap().panel, PanelView::Closed);
}

#[tokio::test]
async fn test_open_panel_then_back_closes_it() {
    let (_svc, nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.open_create_panel();
    assert_eq!(page.url_state().draft_input(), Some(serde_json::json!({})));
    assert!(page.is_create_panel_open());

    assert!(nav.back());
    assert!(!page.is_create_panel_open());
    assert!(nav.forward());
    assert!(page.is_create_panel_open());

    page.close_create_panel();
    assert!(!page.is_create_panel_open());
}

// ---------------------------------------------------------------------------
// List loading
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_loading_before_mount() {
    let (_svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    assert_eq!(page.view().unwrap().body, ListBody::Loading);
    assert!(page.items().is_none());
}

#[tokio::test]
async fn test_empty_list_renders_empty_state() {
    let (_svc, _nav, page) = make_page(FakeService::with_list("", vec![]), "cron-workflows");
    page.mount().await;
    assert_eq!(page.view().unwrap().body, ListBody::Empty);
    assert_eq!(page.items(), Some(vec![]));
}

#[tokio::test]
async fn test_rows_keep_server_order() {
    let svc = FakeService::with_list(
        "",
        vec![workflow("b", "z"), workflow("a", "y"), workflow("b", "a")],
    );
    let (_svc, _nav, page) = make_page(svc, "cron-workflows");
    page.mount().await;
    assert_eq!(row_keys(&page), vec!["b/z", "a/y", "b/a"]);

    let view = page.view().unwrap();
    if let ListBody::Rows(rows) = view.body {
        assert_eq!(rows[0].detail_route, "cron-workflows/b/z");
        assert_eq!(rows[0].schedule, "0 * * * *");
    }
}

#[tokio::test]
async fn test_list_failure_fails_the_page() {
    let svc = FakeService::default();
    *svc.list_failure.lock() = Some((500, "boom".to_string()));
    let (_svc, _nav, page) = make_page(svc, "cron-workflows");
    page.mount().await;

    let stored = page.error().expect("error should be stored");
    assert!(matches!(
        stored.as_ref(),
        CronWfError::Api { status: 500, message } if message == "boom"
    ));
    let rendered = page.view().unwrap_err();
    assert!(Arc::ptr_eq(&stored, &rendered));
}

#[tokio::test]
async fn test_mount_loads_once() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.mount().await;
    page.mount().await;
    assert_eq!(svc.list_calls().len(), 1);
}

#[tokio::test]
async fn test_set_namespace_does_not_reload() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.mount().await;
    page.url_state().set_namespace("x");
    assert_eq!(page.namespace(), "x");
    assert_eq!(svc.list_calls().len(), 1);
}

#[tokio::test]
async fn test_change_namespace_reloads() {
    let svc = FakeService::with_list("x", vec![workflow("x", "a")]);
    svc.lists
        .lock()
        .insert("y".to_string(), vec![workflow("y", "b")]);
    let (svc, nav, page) = make_page(svc, "cron-workflows");
    page.mount().await;

    page.change_namespace("x").await.unwrap();
    assert_eq!(row_keys(&page), vec!["x/a"]);
    page.change_namespace("y").await.unwrap();
    assert_eq!(row_keys(&page), vec!["y/b"]);

    assert_eq!(svc.list_calls(), vec!["", "x", "y"]);
    assert_eq!(nav.history_len(), 1);
    assert_eq!(nav.location().to_string(), "cron-workflows?namespace=y");
}

#[tokio::test]
async fn test_change_namespace_rejects_invalid() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    let err = page.change_namespace("Not_Valid").await.unwrap_err();
    assert!(matches!(err, CronWfError::Validation(_)));
    assert!(svc.list_calls().is_empty());
    assert_eq!(page.namespace(), "");
}

#[tokio::test]
async fn test_latest_load_wins_over_late_completion() {
    let svc = FakeService::with_list("x", vec![workflow("x", "a")]);
    svc.lists
        .lock()
        .insert("y".to_string(), vec![workflow("y", "b")]);
    let release_x = svc.gate("x");
    let release_y = svc.gate("y");
    let (svc, _nav, page) = make_page(svc, "cron-workflows");

    let p = page.clone();
    let load_x = tokio::spawn(async move { p.change_namespace("x").await });
    while !svc.list_calls().contains(&"x".to_string()) {
        tokio::task::yield_now().await;
    }

    let p = page.clone();
    let load_y = tokio::spawn(async move { p.change_namespace("y").await });
    while !svc.list_calls().contains(&"y".to_string()) {
        tokio::task::yield_now().await;
    }
    assert_eq!(page.view().unwrap().body, ListBody::Loading);

    release_y.send(()).unwrap();
    load_y.await.unwrap().unwrap();
    assert_eq!(row_keys(&page), vec!["y/b"]);

    release_x.send(()).unwrap();
    load_x.await.unwrap().unwrap();
    assert_eq!(row_keys(&page), vec!["y/b"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_namespace_changes_settle_on_final_filter() {
    let svc = FakeService {
        list_yields: 3,
        ..FakeService::default()
    };
    for i in 0..20 {
        let ns = format!("ns-{}", i);
        svc.lists
            .lock()
            .insert(ns.clone(), vec![workflow(&ns, "a")]);
    }
    let (_svc, _nav, page) = make_page(svc, "cron-workflows");

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let p = page.clone();
            tokio::spawn(async move { p.change_namespace(&format!("ns-{}", i)).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(row_keys(&page), vec![format!("{}/a", page.namespace())]);
}

#[tokio::test]
async fn test_unmount_drops_late_result() {
    let svc = FakeService::with_list("", vec![workflow("a", "b")]);
    let release = svc.gate("");
    let (svc, _nav, page) = make_page(svc, "cron-workflows");

    let p = page.clone();
    let mount = tokio::spawn(async move { p.mount().await });
    while svc.list_calls().is_empty() {
        tokio::task::yield_now().await;
    }
    page.unmount();
    release.send(()).unwrap();
    mount.await.unwrap();

    assert!(page.items().is_none());
}

// ---------------------------------------------------------------------------
// Create flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_submit_creates_and_navigates_to_detail() {
    let (svc, nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.mount().await;
    page.open_create_panel();

    let created = page
        .submit(r#"{"metadata":{"name":"a","namespace":"b"}}"#)
        .await
        .unwrap();
    assert_eq!(created.key(), "b/a");

    let calls = svc.create_calls.lock().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "b");
    assert_eq!(calls[0].0["metadata"]["name"], "a");

    assert_eq!(nav.location().path, "cron-workflows/b/a");
    assert!(nav.location().query.is_empty());
}

#[tokio::test]
async fn test_submit_navigates_to_server_assigned_identity() {
    let svc = FakeService::default();
    *svc.created_name.lock() = Some("hello-x7k2p".to_string());
    let (_svc, nav, page) = make_page(svc, "cron-workflows?new=%7B%7D");

    page.submit(r#"{"metadata":{"generateName":"hello-","namespace":"argo"}}"#)
        .await
        .unwrap();
    assert_eq!(nav.location().path, "cron-workflows/argo/hello-x7k2p");
}

#[tokio::test]
async fn test_malformed_draft_stays_in_panel() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.mount().await;
    page.open_create_panel();

    let err = page.submit("{").await.unwrap_err();
    assert!(matches!(err.as_ref(), CronWfError::DraftParse(_)));
    assert!(svc.create_calls.lock().is_empty());

    assert!(page.error().is_none());
    assert!(page.panel_error().is_some());
    match page.view().unwrap().panel {
        PanelView::Open { error, .. } => assert!(error.is_some()),
        PanelView::Closed => panic!("panel should stay open"),
    }

    // A corrected draft clears the panel error.
    page.submit(r#"{"metadata":{"name":"a","namespace":"b"}}"#)
        .await
        .unwrap();
    assert!(page.panel_error().is_none());
}

#[tokio::test]
async fn test_submit_sends_unmodelled_fields_verbatim() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows?new=%7B%7D");
    let draft = serde_json::json!({
        "metadata": {
            "name": "a",
            "namespace": "b",
            "finalizers": ["example.com/cleanup"]
        },
        "spec": {
            "schedule": "* * * * *",
            "workflowMetadata": {"labels": {"team": "x"}},
            "workflowSpec": {"entrypoint": "main"}
        }
    });

    let created = page.submit(&draft.to_string()).await.unwrap();
    assert_eq!(created.metadata.extra["finalizers"], draft["metadata"]["finalizers"]);

    let calls = svc.create_calls.lock().clone();
    assert_eq!(calls[0].0, draft);
}

#[tokio::test]
async fn test_off_type_field_is_left_to_the_server() {
    let (svc, nav, page) = make_page(FakeService::default(), "cron-workflows?new=%7B%7D");
    let text = r#"{"metadata":{"name":"a","namespace":"b"},"spec":{"schedule":"* * * * *","suspend":"no"}}"#;

    page.submit(text).await.unwrap();
    assert!(page.panel_error().is_none());
    let calls = svc.create_calls.lock().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0["spec"]["suspend"], "no");
    assert_eq!(nav.location().path, "cron-workflows/b/a");
}

#[tokio::test]
async fn test_submit_without_namespace_targets_empty_namespace() {
    let (svc, _nav, page) = make_page(FakeService::default(), "cron-workflows?new=%7B%7D");
    page.submit(r#"{"metadata":{"name":"a"}}"#).await.unwrap();
    assert_eq!(svc.create_calls.lock()[0].1, "");
}

#[tokio::test]
async fn test_back_closing_panel_drops_its_error() {
    let (_svc, nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.open_create_panel();
    let _ = page.submit("{").await;
    assert!(page.panel_error().is_some());

    assert!(nav.back());
    assert_eq!(page.view().unwrap().panel, PanelView::Closed);

    assert!(nav.forward());
    match page.view().unwrap().panel {
        PanelView::Open { error, .. } => assert!(error.is_none()),
        PanelView::Closed => panic!("panel should reopen"),
    }
    assert!(page.panel_error().is_none());
}

#[tokio::test]
async fn test_close_panel_clears_panel_error() {
    let (_svc, _nav, page) = make_page(FakeService::default(), "cron-workflows");
    page.open_create_panel();
    let _ = page.submit("not json").await;
    assert!(page.panel_error().is_some());

    page.close_create_panel();
    assert!(page.panel_error().is_none());
    assert_eq!(page.view().unwrap().panel, PanelView::Closed);
}

#[tokio::test]
async fn test_create_failure_is_page_level() {
    let svc = FakeService::default();
    *svc.create_failure.lock() = Some((400, "schedule is required".to_string()));
    let (_svc, nav, page) = make_page(svc, "cron-workflows");
    page.mount().await;
    page.open_create_panel();

    let err = page
        .submit(r#"{"metadata":{"name":"a","namespace":"b"}}"#)
        .await
        .unwrap_err();
    assert!(matches!(err.as_ref(), CronWfError::Api { status: 400, .. }));

    let stored = page.view().unwrap_err();
    assert!(Arc::ptr_eq(&err, &stored));
    // The panel is left as it was.
    assert!(page.is_create_panel_open());
    assert_eq!(nav.location().path, "cron-workflows");
}
