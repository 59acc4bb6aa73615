use std::io::{self, IsTerminal};

use anyhow::Result;
use fusion_cli::config::CliConfig;
use fusion_cli::progress::SpinnerReporter;
use fusion_cli::run::{RunSettings, is_validation, run_fusion, workspace_sources};
use fusion_cli::text::Messages;
use tracing::{Instrument, error, info_span};

use crate::cli::{RunArgs, SourcesArgs};
use crate::summary::{print_sources, print_summary};

/// Exit code for a run refused before anything was read.
pub const EXIT_VALIDATION: i32 = 2;

pub async fn run_sources(args: &SourcesArgs, messages: &'static Messages) -> Result<()> {
    let sources = workspace_sources(&args.workspace).await?;
    print_sources(&sources, messages);
    Ok(())
}

/// Runs the fusion and reports the outcome; returns the exit code.
pub async fn run_fusion_command(
    args: &RunArgs,
    config: &CliConfig,
    messages: &'static Messages,
    interactive: bool,
) -> i32 {
    let mut options = config.fusion.clone();
    if let Some(separator) = &args.separator {
        options.separator.clone_from(separator);
    }
    if args.no_disambiguate {
        options.disambiguate_duplicate_names = false;
    }
    if args.no_switch {
        options.switch_to_output = false;
    }
    let settings = RunSettings {
        workspace: args.workspace.clone(),
        sources: args.sources.clone(),
        output: args.output.clone(),
        options,
        dry_run: args.dry_run,
    };

    eprintln!("{}", messages.title);
    eprintln!("{}", messages.output_warning);
    let reporter = if interactive && io::stderr().is_terminal() {
        SpinnerReporter::new(messages)
    } else {
        SpinnerReporter::hidden(messages)
    };

    let span = info_span!("run", workspace = %args.workspace.display(), output = %args.output);
    match run_fusion(&settings, &reporter).instrument(span).await {
        Ok(outcome) => {
            print_summary(&outcome, messages);
            0
        }
        Err(err) if is_validation(&err) => {
            reporter.clear();
            eprintln!("warning: {}", messages.too_few_sources);
            EXIT_VALIDATION
        }
        Err(err) => {
            reporter.fail(messages.failure);
            error!(error = %format!("{err:#}"), "fusion failed");
            eprintln!("error: {}: {err:#}", messages.failure);
            1
        }
    }
}
