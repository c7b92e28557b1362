//! Workflow layer between the command line and the library.

pub mod orchestration;

pub use orchestration::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
