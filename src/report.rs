//! Per-tag outcome aggregation and CI summary reporting.
use std::time::Duration;

use crate::result::Result;
use color_eyre::eyre::WrapErr;

/// Terminal state of one tag in the publish flow.
///
/// `Detected → {Skipped | Attempting → {Created | Failed}}` — there
/// are no retries and no transitions back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Skipped,
    Failed(String),
}

/// One tag and what happened to it, in processing order.
#[derive(Debug, Clone)]
pub struct TagReport {
    pub tag: String,
    pub outcome: Outcome,
}

/// Counts per outcome plus elapsed wall-clock time.
#[derive(Debug, PartialEq, Eq)]
pub struct ReleaseStats {
    pub total: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl ReleaseStats {
    /// Tally outcomes once all tags have been processed.
    pub fn tally(reports: &[TagReport], duration: Duration) -> Self {
        let mut stats = Self {
            total: reports.len(),
            created: 0,
            skipped: 0,
            failed: 0,
            duration,
        };

        for report in reports {
            match report.outcome {
                Outcome::Created => stats.created += 1,
                Outcome::Skipped => stats.skipped += 1,
                Outcome::Failed(_) => stats.failed += 1,
            }
        }

        stats
    }
}

/// Render the markdown report: header, one bullet per tag, then the
/// statistics block.
pub fn render(
    reports: &[TagReport],
    stats: &ReleaseStats,
    repository: Option<&str>,
) -> String {
    let mut out = String::from("## Release Summary\n\n");

    for report in reports {
        out.push_str(&render_bullet(report, repository));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_stats(stats));

    out
}

/// Report used when no tags point at HEAD at all.
pub fn render_empty() -> String {
    "## Release Summary\n\nNo tags found at HEAD — nothing to release.\n"
        .to_string()
}

fn render_bullet(report: &TagReport, repository: Option<&str>) -> String {
    match &report.outcome {
        Outcome::Created => match repository {
            Some(repo) => format!(
                "- ✅ Created release [`{tag}`](https://github.com/{repo}/releases/tag/{tag})",
                tag = report.tag,
            ),
            None => format!("- ✅ Created release `{}`", report.tag),
        },
        Outcome::Skipped => {
            format!("- ⏭ Skipped `{}` (not a releasable app)", report.tag)
        }
        Outcome::Failed(reason) => {
            format!("- ❌ Failed `{}`: {}", report.tag, reason)
        }
    }
}

fn render_stats(stats: &ReleaseStats) -> String {
    format!(
        "**Statistics**\n\n\
         - Total tags: {}\n\
         - Created: {}\n\
         - Skipped: {}\n\
         - Failed: {}\n\
         - Duration: {:.1}s\n",
        stats.total,
        stats.created,
        stats.skipped,
        stats.failed,
        stats.duration.as_secs_f64(),
    )
}

/// Append the report to the CI step-summary file.
///
/// The file is shared with earlier workflow steps, so this always
/// appends rather than truncates.
pub fn append_to_step_summary(path: &str, content: &str) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open step summary: {path}"))?;

    file.write_all(content.as_bytes())
        .wrap_err_with(|| format!("failed to write step summary: {path}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reports() -> Vec<TagReport> {
        vec![
            TagReport {
                tag: "docs@1.0.1".to_string(),
                outcome: Outcome::Created,
            },
            TagReport {
                tag: "@repo/ui@0.3.0".to_string(),
                outcome: Outcome::Skipped,
            },
            TagReport {
                tag: "web@2.0.0".to_string(),
                outcome: Outcome::Failed("release already exists".to_string()),
            },
        ]
    }

    #[test]
    fn tallies_outcomes() {
        let stats =
            ReleaseStats::tally(&reports(), Duration::from_millis(1500));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.created, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn renders_bullets_in_processing_order() {
        let reports = reports();
        let stats = ReleaseStats::tally(&reports, Duration::from_secs(2));

        let summary = render(&reports, &stats, Some("org/repo"));

        let created = summary.find("docs@1.0.1").unwrap();
        let skipped = summary.find("@repo/ui@0.3.0").unwrap();
        let failed = summary.find("web@2.0.0").unwrap();
        assert!(created < skipped && skipped < failed);

        assert!(summary.contains(
            "[`docs@1.0.1`](https://github.com/org/repo/releases/tag/docs@1.0.1)"
        ));
        assert!(
            summary.contains("⏭ Skipped `@repo/ui@0.3.0` (not a releasable app)")
        );
        assert!(
            summary.contains("❌ Failed `web@2.0.0`: release already exists")
        );
    }

    #[test]
    fn renders_link_free_bullet_without_repository() {
        let reports = vec![TagReport {
            tag: "docs@1.0.1".to_string(),
            outcome: Outcome::Created,
        }];
        let stats = ReleaseStats::tally(&reports, Duration::ZERO);

        let summary = render(&reports, &stats, None);

        assert!(summary.contains("✅ Created release `docs@1.0.1`"));
        assert!(!summary.contains("github.com"));
    }

    #[test]
    fn renders_duration_with_one_decimal() {
        let stats = ReleaseStats::tally(&[], Duration::from_millis(3240));
        let block = render_stats(&stats);
        assert!(block.contains("Duration: 3.2s"));
    }

    #[test]
    fn appends_instead_of_truncating() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        std::fs::write(path, "earlier step\n").unwrap();
        append_to_step_summary(path, "## Release Summary\n").unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("earlier step\n"));
        assert!(content.ends_with("## Release Summary\n"));
    }
}
