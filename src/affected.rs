//! Affected-package detection via the build-graph tool.
//!
//! The query is a fixed, non-parameterized delegation to `turbo`,
//! which compares the working tree against its base reference and
//! reports every package whose sources changed directly or
//! transitively.
use serde::Deserialize;

#[cfg(test)]
use mockall::automock;

use crate::exec::{self, ExecError};

/// One package impacted by the current change set.
///
/// Produced by the detection query, consumed read-only by the filter
/// and record-building steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffectedPackage {
    pub name: String,
    pub version: Option<String>,
    pub path: Option<String>,
}

/// Source of affected packages.
///
/// The production implementation shells out to the build-graph tool;
/// tests substitute a mock. Callers decide what a failure means — the
/// changeset command deliberately treats it as "no affected packages".
#[cfg_attr(test, automock)]
pub trait AffectedSource {
    fn affected_packages(&self) -> Result<Vec<AffectedPackage>, ExecError>;
}

/// Shape of `turbo ls --affected --output json`.
#[derive(Debug, Deserialize)]
struct TurboLsOutput {
    packages: TurboPackageList,
}

#[derive(Debug, Deserialize)]
struct TurboPackageList {
    items: Vec<TurboPackageDescriptor>,
}

#[derive(Debug, Deserialize)]
struct TurboPackageDescriptor {
    name: String,
    version: Option<String>,
    path: Option<String>,
}

/// Production detector backed by `turbo ls`.
pub struct TurboLs;

impl AffectedSource for TurboLs {
    fn affected_packages(&self) -> Result<Vec<AffectedPackage>, ExecError> {
        let stdout =
            exec::run("turbo", &["ls", "--affected", "--output", "json"])?;

        parse_turbo_ls(&stdout)
    }
}

/// Parse the JSON package listing into the detection result.
///
/// An unparsable payload surfaces as [`ExecError::InvalidOutput`] so
/// the caller's fail-open policy covers it the same way it covers a
/// failed subprocess.
fn parse_turbo_ls(stdout: &str) -> Result<Vec<AffectedPackage>, ExecError> {
    let output: TurboLsOutput =
        serde_json::from_str(stdout).map_err(|_| ExecError::InvalidOutput {
            program: "turbo".to_string(),
        })?;

    let packages = output
        .packages
        .items
        .into_iter()
        .map(|item| AffectedPackage {
            name: item.name,
            version: item.version,
            path: item.path,
        })
        .collect();

    Ok(packages)
}

/// Exclude packages whose name contains any configured pattern.
///
/// Matching is case-sensitive and unanchored: a pattern matches
/// anywhere in the name. Relative order of survivors is preserved.
pub fn filter_excluded(
    packages: Vec<AffectedPackage>,
    patterns: &[String],
) -> Vec<AffectedPackage> {
    packages
        .into_iter()
        .filter(|package| {
            let excluded = patterns
                .iter()
                .any(|pattern| package.name.contains(pattern.as_str()));

            if excluded {
                log::info!("excluding package from changeset: {}", package.name);
            }

            !excluded
        })
        .collect()
}
