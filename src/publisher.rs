//! Release creation via the GitHub CLI.
use crate::exec::{self, ExecError};

#[cfg(test)]
use mockall::automock;

/// Creates a published release for one tag.
///
/// Each call is independent: the publish flow never short-circuits on
/// a failed tag, and duplicate-release rejection is left to the
/// underlying command.
#[cfg_attr(test, automock)]
pub trait ReleasePublisher {
    fn create_release(&self, tag: &str) -> Result<(), ExecError>;
}

/// Production publisher delegating to `gh release create`.
///
/// Release notes are auto-generated by the platform from the commit
/// history since the previous tag.
pub struct GhCli;

impl ReleasePublisher for GhCli {
    fn create_release(&self, tag: &str) -> Result<(), ExecError> {
        exec::run("gh", &["release", "create", tag, "--generate-notes"])?;

        Ok(())
    }
}
