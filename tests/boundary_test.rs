use release_tagger::boundary::BoundaryWarning;
use release_tagger::domain::TagPrefix;
use release_tagger::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: "v1.0.0".to_string(),
        current_commit_hash: "abc1234def5678".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v1.0.0"),
        "Message should contain tag 'v1.0.0', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("abc1234") && !display_msg.contains("abc1234d"),
        "Message should contain shortened commit hash 'abc1234', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_short_hash_is_not_truncated() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: "v1.0.0".to_string(),
        current_commit_hash: "abc".to_string(),
    };
    assert!(warning.to_string().contains("(current: abc)"));
}

#[test]
fn test_boundary_warning_unparsable_tag_display() {
    let warning = BoundaryWarning::UnparsableTag {
        tag: "release-123".to_string(),
        reason: "Invalid format".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("Cannot parse tag"),
        "Message should contain 'Cannot parse tag', got: {}",
        display_msg
    );
    assert!(display_msg.contains("release-123"));
    assert!(display_msg.contains("Invalid format"));
}

#[test]
fn test_unparsable_tag_from_parse_failure() {
    let failure = TagPrefix::default().parse("nightly").unwrap_err();
    let warning = BoundaryWarning::from(failure);

    match &warning {
        BoundaryWarning::UnparsableTag { tag, reason } => {
            assert_eq!(tag, "nightly");
            assert!(reason.contains("prefix"), "got: {}", reason);
        }
        other => panic!("unexpected warning: {:?}", other),
    }
}

#[test]
fn test_boundary_warning_override_not_semver_display() {
    let warning = BoundaryWarning::OverrideNotSemver {
        tag: "v2024.05".to_string(),
    };
    let display_msg = warning.to_string();
    assert!(display_msg.contains("v2024.05"));
    assert!(display_msg.contains("not a semantic version"));
}

#[test]
fn test_boundary_warning_fetch_display() {
    let auth = BoundaryWarning::FetchAuthenticationFailed {
        remote: "origin".to_string(),
    };
    assert!(auth.to_string().contains("Authentication failed"));
    assert!(auth.to_string().contains("origin"));

    let other = BoundaryWarning::FetchFailed {
        remote: "upstream".to_string(),
        reason: "network unreachable".to_string(),
    };
    assert!(other.to_string().contains("upstream"));
    assert!(other.to_string().contains("network unreachable"));
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    let warnings = [
        BoundaryWarning::NoNewCommits {
            latest_tag: "v1.0.0".to_string(),
            current_commit_hash: String::new(),
        },
        BoundaryWarning::FetchAuthenticationFailed {
            remote: "origin".to_string(),
        },
    ];
    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
}
