//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic for the release workflow.
//! Styling goes through `console` so colors are dropped when the output is not a terminal.

use crate::boundary::BoundaryWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Shorten a commit message to its first line, at most `max` characters.
pub fn summarize_commit(message: &str, max: usize) -> String {
    let first_line = message.lines().next().unwrap_or_default();
    if first_line.chars().count() > max {
        let truncated: String = first_line.chars().take(max).collect();
        format!("{}…", truncated)
    } else {
        first_line.to_string()
    }
}

/// Display commit analysis for a branch.
///
/// Shows the branch name and up to 10 commits from the provided list.
/// If more than 10 commits exist, displays count of remaining commits.
///
/// # Arguments
/// * `commit_messages` - List of commit messages to display
/// * `branch_name` - The name of the branch being analyzed
pub fn display_commit_analysis(commit_messages: &[String], branch_name: &str) {
    println!(
        "\n{}",
        style(format!("Analyzing commits on branch '{}'", branch_name)).bold()
    );
    println!(
        "{}",
        style(format!("{} commits since last release:", commit_messages.len())).underlined()
    );

    for (i, message) in commit_messages.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, summarize_commit(message, 60));
    }

    if commit_messages.len() > 10 {
        println!("  ... and {} more commits", commit_messages.len() - 10);
    }
}

/// Display the resolved tag change (or initial tag).
///
/// # Arguments
/// * `old_tag` - Tag the new one was derived from (None if this is the initial tag)
/// * `new_tag` - The resolved tag
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Next Tag:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Tag:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display branches configured for tagging and their channels.
///
/// # Arguments
/// * `branches` - `(branch, channel)` pairs; `None` marks a production branch
pub fn display_available_branches(branches: &[(String, Option<String>)]) {
    println!("{}", style("Configured branches:").bold());
    for (branch, channel) in branches {
        match channel {
            Some(channel) => println!("  - {} (channel: {})", branch, channel),
            None => println!("  - {} (production)", branch),
        }
    }
}

/// Display manual push instruction for a tag.
///
/// Shows the git command needed to push the tag to a remote.
///
/// # Arguments
/// * `tag` - The tag that was created locally
/// * `remote` - The remote name (e.g., "origin")
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_short_commit() {
        assert_eq!(summarize_commit("fix: typo", 60), "fix: typo");
    }

    #[test]
    fn test_summarize_takes_first_line() {
        assert_eq!(
            summarize_commit("feat: thing\n\nlong body here", 60),
            "feat: thing"
        );
    }

    #[test]
    fn test_summarize_truncates_on_char_boundary() {
        let message = "é".repeat(70);
        let summary = summarize_commit(&message, 60);
        assert_eq!(summary.chars().count(), 61);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        // Visual verification test - output is printed to stdout/stderr
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_proposed_tag(Some("v1.0.0"), "v1.1.0");
        display_proposed_tag(None, "v0.1.0-dev.0");
    }
}
