//! Example document shown as the create panel's placeholder.

use crate::cron::schema::{CronWorkflow, CronWorkflowSpec, Extra, ObjectMeta};

/// A runnable cron workflow in `namespace` that prints a greeting every minute.
pub fn example_cron_workflow(namespace: &str) -> CronWorkflow {
    let workflow_spec = serde_json::json!({
        "entrypoint": "whalesay",
        "templates": [{
            "name": "whalesay",
            "container": {
                "name": "main",
                "image": "docker/whalesay:latest",
                "command": ["cowsay"],
                "args": ["hello world"]
            }
        }]
    });

    CronWorkflow {
        metadata: ObjectMeta {
            name: "hello-world".to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        },
        spec: CronWorkflowSpec {
            schedule: "* * * * *".to_string(),
            extra: Extra::from_iter([("workflowSpec".to_string(), workflow_spec)]),
        },
        ..Default::default()
    }
}

/// The example serialized as YAML, the way the editor displays documents.
pub fn example_placeholder(namespace: &str) -> String {
    // Serializing a plain struct of strings and JSON values cannot fail.
    serde_yaml::to_string(&example_cron_workflow(namespace)).unwrap_or_default()
}
