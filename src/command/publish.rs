//! Publish command: scan tags at HEAD, create releases, report.
use color_eyre::eyre::{WrapErr, eyre};
use log::*;
use std::time::Instant;

use crate::{
    cli::CiEnvironment,
    config::PublishConfig,
    publisher::{GhCli, ReleasePublisher},
    report::{self, Outcome, ReleaseStats, TagReport},
    result::Result,
    tags::{GitCli, TagSource},
};

/// Execute the publish command with the production git and gh CLIs.
pub fn execute(config: &PublishConfig, env: &CiEnvironment) -> Result<()> {
    run(&GitCli, &GhCli, config, env)
}

/// Detect tags → classify → create releases → report.
///
/// Tags are processed independently: one failed release never aborts
/// the rest of the batch, but any failure makes the overall run exit
/// non-zero once every tag has been handled.
fn run(
    tags: &dyn TagSource,
    publisher: &dyn ReleasePublisher,
    config: &PublishConfig,
    env: &CiEnvironment,
) -> Result<()> {
    let started = Instant::now();

    // A git failure here is an infrastructure failure, not an empty
    // result, and aborts the run.
    let tags = tags
        .tags_at_head()
        .wrap_err("failed to list tags at HEAD")?;

    if tags.is_empty() {
        info!("no tags found at HEAD: nothing to release");
        write_summary(env, &report::render_empty())?;
        return Ok(());
    }

    let total = tags.len();
    let mut reports = Vec::with_capacity(total);

    for (index, tag) in tags.iter().enumerate() {
        let outcome = process_tag(publisher, tag, &config.release_prefixes);

        info!("processed tag {}/{}: {}", index + 1, total, tag);
        reports.push(TagReport {
            tag: tag.clone(),
            outcome,
        });
    }

    let stats = ReleaseStats::tally(&reports, started.elapsed());
    let summary = report::render(&reports, &stats, env.repository.as_deref());

    info!("{summary}");
    write_summary(env, &summary)?;

    if stats.failed > 0 {
        return Err(eyre!(
            "{} of {} release(s) failed",
            stats.failed,
            stats.total
        ));
    }

    info!("created {} release(s)", stats.created);

    Ok(())
}

fn process_tag(
    publisher: &dyn ReleasePublisher,
    tag: &str,
    prefixes: &[String],
) -> Outcome {
    if !is_releasable(tag, prefixes) {
        info!("skipping {tag}: not in the release allow-list");
        return Outcome::Skipped;
    }

    info!("creating release for {tag}");

    match publisher.create_release(tag) {
        Ok(()) => Outcome::Created,
        Err(err) => {
            error!("failed to create release for {tag}: {err}");
            Outcome::Failed(err.first_line())
        }
    }
}

/// A tag is release-eligible iff it starts with one of the configured
/// prefixes. Releases only make sense for deployable applications;
/// internal libraries are versioned but never released.
fn is_releasable(tag: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| tag.starts_with(prefix.as_str()))
}

fn write_summary(env: &CiEnvironment, content: &str) -> Result<()> {
    if let Some(path) = &env.step_summary_path {
        report::append_to_step_summary(path, content)?;
    }

    Ok(())
}
