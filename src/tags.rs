//! Git tag discovery for the publish command.
use crate::exec::{self, ExecError};

#[cfg(test)]
use mockall::automock;

/// Source of tags pointing at the current commit.
///
/// Unlike affected-package detection, a failure here is an
/// infrastructure failure and aborts the run: the publish command
/// cannot distinguish "no tags" from "could not ask git" on its own.
#[cfg_attr(test, automock)]
pub trait TagSource {
    fn tags_at_head(&self) -> Result<Vec<String>, ExecError>;
}

/// Production tag source backed by the system git CLI.
pub struct GitCli;

impl TagSource for GitCli {
    fn tags_at_head(&self) -> Result<Vec<String>, ExecError> {
        let stdout = exec::run("git", &["tag", "--points-at", "HEAD"])?;

        Ok(parse_tag_list(&stdout))
    }
}

/// Split newline-separated tag output, dropping blank lines.
///
/// Order is whatever git yields; the publish flow does not sort.
fn parse_tag_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
