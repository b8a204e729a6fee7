//! Changeset rendering and writing.
//!
//! A changeset is a markdown file an external versioning tool later
//! consumes to bump versions and create tags: YAML-style frontmatter
//! mapping each package name to a bump severity, then a free-text body
//! with an optional pull-request reference.
use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::affected::AffectedPackage;
use crate::config::Bump;
use crate::result::Result;
use color_eyre::eyre::WrapErr;

/// Body text used when the caller supplies no description.
pub const DEFAULT_DESCRIPTION: &str =
    "Automated version bump for affected packages";

/// Body metadata for one changeset.
#[derive(Debug, Default)]
pub struct RecordMetadata<'a> {
    pub description: &'a str,
    pub pr_number: Option<u64>,
    pub repository: Option<&'a str>,
}

/// Render the changeset content for a non-empty package list.
///
/// Pure and deterministic: identical input yields byte-identical
/// output. Section order is fixed — frontmatter, blank line, optional
/// reference line, description, trailing newline.
pub fn render(
    packages: &[AffectedPackage],
    bump: Bump,
    metadata: &RecordMetadata<'_>,
) -> String {
    let mut content = String::from("---\n");

    for package in packages {
        content.push_str(&format!("\"{}\": {}\n", package.name, bump));
    }

    content.push_str("---\n\n");

    if let Some(reference) =
        reference_line(metadata.pr_number, metadata.repository)
    {
        content.push_str(&reference);
        content.push_str("\n\n");
    }

    content.push_str(metadata.description);
    content.push('\n');

    content
}

/// Render the pull-request reference line, if any.
///
/// With both a number and a repository this is a full markdown link;
/// with only a number it is a bare `#N` (the forge auto-links it);
/// with neither there is no reference line at all.
fn reference_line(
    pr_number: Option<u64>,
    repository: Option<&str>,
) -> Option<String> {
    let number = pr_number?;

    match repository {
        Some(repo) => Some(format!(
            "[#{number}](https://github.com/{repo}/pull/{number})"
        )),
        None => Some(format!("#{number}")),
    }
}

/// Write the rendered content to a uniquely named file in the
/// changeset directory, creating the directory if needed.
///
/// The filename embeds the current epoch milliseconds; two runs in the
/// same millisecond could collide, which this design accepts. Any
/// filesystem failure is fatal to the run.
pub fn write(dir: &str, content: &str) -> Result<PathBuf> {
    let filename = format!("auto-{}.md", Utc::now().timestamp_millis());
    let path = Path::new(dir).join(filename);

    std::fs::create_dir_all(dir).wrap_err_with(|| {
        format!("failed to create changeset directory: {dir}")
    })?;

    std::fs::write(&path, content).wrap_err_with(|| {
        format!("failed to write changeset: {}", path.display())
    })?;

    Ok(path)
}
