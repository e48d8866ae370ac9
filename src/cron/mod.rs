//! Cron workflow resource model.

pub mod example;
pub mod schema;

pub use example::{example_cron_workflow, example_placeholder};
pub use schema::*;
