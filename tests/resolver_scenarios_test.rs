use release_tagger::domain::{
    bump, BumpKind, ChannelRank, StructuredVersion, Tag, TagPrefix,
};
use release_tagger::{ChannelConfig, ResolutionPath, TagResolver, TaggerError};

fn tags(names: &[&str]) -> Vec<Tag> {
    names.iter().map(|n| Tag::new(*n)).collect()
}

fn rank() -> ChannelRank {
    ChannelRank::new(["dev", "rc"])
}

fn channel(name: &str) -> ChannelConfig {
    ChannelConfig::prerelease(TagPrefix::default(), name).with_channel_rank(rank())
}

fn production() -> ChannelConfig {
    ChannelConfig::production(TagPrefix::default()).with_channel_rank(rank())
}

// ============================================================================
// Version laws
// ============================================================================

#[test]
fn test_format_then_parse_is_identity() {
    let prefix = TagPrefix::default();
    for raw in ["0.0.0", "1.2.3", "10.0.7-dev.0", "2.3.0-rc.12"] {
        let version = StructuredVersion::parse(raw).unwrap();
        let tag = prefix.format(&version);
        assert_eq!(prefix.parse(&tag).unwrap(), version, "tag {}", tag);
    }
}

#[test]
fn test_stable_outranks_prerelease_of_same_version() {
    let stable = StructuredVersion::parse("1.0.0").unwrap();
    let rc = StructuredVersion::parse("1.0.0-rc.9").unwrap();
    assert!(stable.compare(&rc, &rank()).is_gt());
    assert!(rc.compare(&stable, &rank()).is_lt());
}

#[test]
fn test_channel_rank_orders_prereleases() {
    let dev = StructuredVersion::parse("1.0.0-dev.5").unwrap();
    let rc = StructuredVersion::parse("1.0.0-rc.0").unwrap();
    assert!(rc.compare(&dev, &rank()).is_gt());

    // Reversed rank reverses the order
    let reversed = ChannelRank::new(["rc", "dev"]);
    assert!(rc.compare(&dev, &reversed).is_lt());
}

#[test]
fn test_bump_none_and_double_prerelease() {
    let version = StructuredVersion::parse("0.3.0-dev.4").unwrap();
    assert_eq!(bump(&version, BumpKind::None, None).unwrap(), version);

    let once = bump(&version, BumpKind::Prerelease, Some("dev")).unwrap();
    let twice = bump(&once, BumpKind::Prerelease, Some("dev")).unwrap();
    assert_eq!(twice.sequence(), Some(6));
    assert_eq!(twice.normal(), version.normal());
}

// ============================================================================
// Resolution scenarios
// ============================================================================

#[test]
fn test_override_on_empty_repository() {
    let resolver = TagResolver::new(channel("dev").with_override("0.1.0-dev.0"));
    let resolution = resolver.resolve(&[], BumpKind::Prerelease).unwrap();
    assert_eq!(resolution.tag, "v0.1.0-dev.0");
    assert_eq!(resolution.path, ResolutionPath::Override);
}

#[test]
fn test_continue_dev_line() {
    let resolver = TagResolver::new(channel("dev"));
    let next = resolver
        .next_tag(&tags(&["v0.1.0-dev.0"]), BumpKind::Prerelease)
        .unwrap();
    assert_eq!(next, "v0.1.0-dev.1");
}

#[test]
fn test_new_dev_line_after_release() {
    let resolver =
        TagResolver::new(channel("dev").with_initial_prerelease_bump(BumpKind::Preminor));
    let resolution = resolver
        .resolve(
            &tags(&["v1.0.0", "v1.0.0-rc.0", "v1.0.0-dev.0", "v0.1.0-dev.0"]),
            BumpKind::Prerelease,
        )
        .unwrap();
    assert_eq!(resolution.tag, "v1.1.0-dev.0");
    assert_eq!(resolution.path, ResolutionPath::NewLine(BumpKind::Preminor));
    assert_eq!(
        resolution.previous.map(|t| t.name),
        Some("v1.0.0".to_string())
    );
}

#[test]
fn test_dev_follows_release_candidate() {
    let resolver = TagResolver::new(channel("dev"));
    let next = resolver
        .next_tag(&tags(&["v0.1.0-dev.1", "v0.2.0-rc.0"]), BumpKind::Minor)
        .unwrap();
    assert_eq!(next, "v0.2.0-dev.0");
}

#[test]
fn test_production_override() {
    let resolver = TagResolver::new(production().with_override("2.3.0"));
    let next = resolver
        .next_tag(
            &tags(&["v2.2.0", "v2.2.0-dev.0", "v2.3.0-rc.0", "v2.3.0-dev.0"]),
            BumpKind::Patch,
        )
        .unwrap();
    assert_eq!(next, "v2.3.0");
}

#[test]
fn test_production_promotes_release_candidate() {
    let resolver = TagResolver::new(production());
    let resolution = resolver
        .resolve(
            &tags(&["v2.2.0", "v2.2.0-dev.0", "v2.3.0-rc.0", "v2.3.0-dev.0"]),
            BumpKind::Patch,
        )
        .unwrap();
    assert_eq!(resolution.tag, "v2.3.0");
    assert_eq!(resolution.path, ResolutionPath::Promotion);
    assert_eq!(
        resolution.previous.map(|t| t.name),
        Some("v2.3.0-rc.0".to_string())
    );
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_resolution_does_not_depend_on_tag_order() {
    let resolver = TagResolver::new(channel("rc"));
    let mut names = vec!["v1.0.0", "v1.1.0-dev.2", "v1.1.0-rc.0", "v1.0.1-dev.0"];
    let forward = resolver.next_tag(&tags(&names), BumpKind::Prerelease).unwrap();
    names.reverse();
    let backward = resolver.next_tag(&tags(&names), BumpKind::Prerelease).unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward, "v1.1.0-rc.1");
}

#[test]
fn test_foreign_tags_are_ignored() {
    let resolver = TagResolver::new(channel("dev"));
    let next = resolver
        .next_tag(
            &tags(&["nightly", "v1", "release-2.0.0", "v0.4.0-dev.2", "v9.9.9-beta"]),
            BumpKind::Prerelease,
        )
        .unwrap();
    assert_eq!(next, "v0.4.0-dev.3");
}

#[test]
fn test_empty_repository_without_initial_version() {
    let resolver = TagResolver::new(channel("dev"));
    let result = resolver.resolve(&[], BumpKind::Prerelease);
    assert!(matches!(result, Err(TaggerError::NoBaseVersion(_))));
}

#[test]
fn test_empty_repository_with_initial_version() {
    let initial = StructuredVersion::parse("0.1.0").unwrap();
    let resolver = TagResolver::new(channel("dev").with_initial_version(initial));
    let resolution = resolver.resolve(&[], BumpKind::Prerelease).unwrap();
    assert_eq!(resolution.tag, "v0.1.0-dev.0");
    assert_eq!(resolution.path, ResolutionPath::InitialVersion);
}

#[test]
fn test_custom_prefix_pattern_accepts_variants() {
    let prefix = TagPrefix::with_pattern("v", "[vV]").unwrap();
    let resolver = TagResolver::new(
        ChannelConfig::prerelease(prefix, "dev").with_channel_rank(rank()),
    );
    let next = resolver
        .next_tag(&tags(&["V1.0.0", "v1.1.0-dev.0"]), BumpKind::Prerelease)
        .unwrap();
    assert_eq!(next, "v1.1.0-dev.1");
}

#[test]
fn test_open_line_continues_even_when_commits_ask_for_more() {
    // An open line at the latest normal version keeps counting; the minor
    // bump does not move the release candidate to 0.2.0.
    let resolver = TagResolver::new(channel("rc"));
    let resolution = resolver
        .resolve(
            &tags(&["v0.1.0-rc.0", "v0.1.0-dev.0", "v0.1.0-dev.1"]),
            BumpKind::Minor,
        )
        .unwrap();
    assert_eq!(resolution.tag, "v0.1.0-rc.1");
    assert_eq!(resolution.path, ResolutionPath::ContinueLine);
}

#[test]
fn test_exhausted_version_fields_are_rejected() {
    let release = TagResolver::new(production());
    let result = release.resolve(&tags(&["v18446744073709551615.0.0"]), BumpKind::Major);
    assert!(matches!(result, Err(TaggerError::InvalidBump(_))));

    let dev = TagResolver::new(channel("dev"));
    let result = dev.resolve(
        &tags(&["v1.0.0-dev.18446744073709551615"]),
        BumpKind::Prerelease,
    );
    assert!(matches!(result, Err(TaggerError::InvalidBump(_))));
}
