//! User interface module - terminal output for the release workflow.

pub mod formatter;

pub use formatter::{
    display_available_branches, display_boundary_warning, display_commit_analysis, display_error,
    display_manual_push_instruction, display_proposed_tag, display_status, display_success,
};
