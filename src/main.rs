use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use release_tagger::cli::{run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
use release_tagger::config::{self, Config};
use release_tagger::git::Git2Repository;
use release_tagger::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-tagger",
    version,
    about = "Resolve, create and push the next release tag for a branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Branch to tag (defaults to the current branch)")]
    branch: Option<String>,

    #[arg(long, help = "Use this version verbatim instead of resolving one")]
    custom_tag: Option<String>,

    #[arg(short, long, help = "Remote to fetch from and push to")]
    remote: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Create the tag locally without pushing it")]
    no_push: bool,

    #[arg(long, help = "Do not fetch tags from the remote first")]
    no_fetch: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,

    #[arg(long, help = "Only print the resolved tag")]
    print: bool,

    #[arg(long, help = "Show configured branches and exit")]
    list: bool,
}

/// Console logging controlled by RUST_LOG, or by `-v` when it is unset
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    if args.list {
        list_configured_branches(&config);
        return Ok(());
    }

    let repo = Git2Repository::open(".").context("Git repository error")?;

    let workflow_args = PublishWorkflowArgs {
        branch: args.branch,
        custom_tag: args.custom_tag,
        remote: args.remote,
        dry_run: args.dry_run || args.print,
        no_push: args.no_push,
        no_fetch: args.no_fetch,
    };

    if !args.print && workflow_args.dry_run {
        ui::display_status("Dry run: no tag will be created or pushed");
    }

    let result = run_publish_workflow(&repo, &config, &workflow_args)?;

    if args.print {
        println!("{}", result.tag);
        return Ok(());
    }

    report(&result);
    Ok(())
}

fn report(result: &WorkflowResult) {
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    if !result.commits.is_empty() {
        ui::display_commit_analysis(&result.commits, &result.branch);
    }
    ui::display_proposed_tag(result.previous_tag.as_deref(), &result.tag);

    if !result.created {
        ui::display_status(&format!("Would create tag {} (bump: {})", result.tag, result.bump));
        return;
    }
    ui::display_success(&format!("Created tag: {}", result.tag));

    if result.pushed {
        ui::display_success(&format!(
            "Successfully published tag {} for branch {}",
            result.tag, result.branch
        ));
    } else {
        ui::display_manual_push_instruction(&result.tag, &result.remote);
    }
}

fn list_configured_branches(config: &Config) {
    let branches: Vec<(String, Option<String>)> = config
        .configured_branches()
        .into_iter()
        .map(|branch| {
            let channel = config.channels.get(&branch).cloned();
            (branch, channel)
        })
        .collect();

    if branches.is_empty() {
        ui::display_error("No branches configured for tagging in release-tagger.toml");
        return;
    }

    ui::display_available_branches(&branches);
}
