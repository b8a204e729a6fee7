//! CLI argument parsing and CI environment discovery.
use clap::{Parser, Subcommand};
use std::env;

/// Global CLI arguments shared by both subcommands.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    /// Path to an alternate policy file. Defaults to shipwright.toml.
    pub config: Option<String>,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Release pipeline subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect affected packages and write a version-bump changeset.
    Changeset {
        /// Free-text description for the changeset body.
        description: Option<String>,
    },

    /// Scan tags at HEAD and create GitHub releases for eligible ones.
    Publish,
}

/// CI-provided context read from the environment at startup.
///
/// All fields are optional: the commands degrade gracefully (bare `#N`
/// references, link-free report bullets, log-only summaries) when the
/// orchestrator does not provide them.
#[derive(Debug, Clone, Default)]
pub struct CiEnvironment {
    /// Pull request number, from PR_NUMBER.
    pub pr_number: Option<u64>,
    /// `owner/repo` identifier, from GITHUB_REPOSITORY.
    pub repository: Option<String>,
    /// Step-summary file path, from GITHUB_STEP_SUMMARY.
    pub step_summary_path: Option<String>,
}

impl CiEnvironment {
    pub fn from_env() -> Self {
        let pr_number = env::var("PR_NUMBER")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok());

        Self {
            pr_number,
            repository: non_empty_var("GITHUB_REPOSITORY"),
            step_summary_path: non_empty_var("GITHUB_STEP_SUMMARY"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
