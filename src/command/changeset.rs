//! Changeset command: detect affected packages, filter, write record.
use log::*;

use crate::{
    affected::{self, AffectedSource, TurboLs},
    cli::CiEnvironment,
    config::ChangesetConfig,
    record::{self, DEFAULT_DESCRIPTION, RecordMetadata},
    result::Result,
};

/// Execute the changeset command with the production detector.
pub fn execute(
    config: &ChangesetConfig,
    description: Option<&str>,
    env: &CiEnvironment,
) -> Result<()> {
    run(&TurboLs, config, description, env)
}

/// Detect → filter → render → write.
///
/// Detection failure is deliberately downgraded to "no affected
/// packages": an inability to detect changes must never block a pull
/// request. Everything after a successful detection — filtering,
/// rendering, writing — is fatal on failure.
fn run(
    source: &dyn AffectedSource,
    config: &ChangesetConfig,
    description: Option<&str>,
    env: &CiEnvironment,
) -> Result<()> {
    let packages = match source.affected_packages() {
        Ok(packages) => packages,
        Err(err) => {
            warn!("affected-package detection failed: {err}");
            warn!("treating as no affected packages: no changeset written");
            return Ok(());
        }
    };

    if packages.is_empty() {
        info!("no affected packages: no changeset written");
        return Ok(());
    }

    let filtered = affected::filter_excluded(packages, &config.exclude);

    if filtered.is_empty() {
        info!("all affected packages are excluded: no changeset written");
        return Ok(());
    }

    let metadata = RecordMetadata {
        description: description.unwrap_or(DEFAULT_DESCRIPTION),
        pr_number: env.pr_number,
        repository: env.repository.as_deref(),
    };

    let content = record::render(&filtered, config.bump, &metadata);
    let path = record::write(&config.dir, &content)?;

    info!(
        "wrote changeset for {} package(s): {}",
        filtered.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affected::{AffectedPackage, MockAffectedSource};
    use crate::config::Bump;
    use crate::exec::ExecError;

    fn package(name: &str) -> AffectedPackage {
        AffectedPackage {
            name: name.to_string(),
            version: None,
            path: None,
        }
    }

    fn config_in(dir: &tempfile::TempDir) -> ChangesetConfig {
        ChangesetConfig {
            dir: dir.path().join("changesets").to_str().unwrap().to_string(),
            ..Default::default()
        }
    }

    fn written_files(config: &ChangesetConfig) -> Vec<std::path::PathBuf> {
        match std::fs::read_dir(&config.dir) {
            Ok(entries) => {
                entries.map(|entry| entry.unwrap().path()).collect()
            }
            Err(_) => vec![],
        }
    }

    #[test_log::test]
    fn detection_failure_is_swallowed_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut source = MockAffectedSource::new();
        source.expect_affected_packages().times(1).returning(|| {
            Err(ExecError::InvalidOutput {
                program: "turbo".to_string(),
            })
        });

        let result =
            run(&source, &config, None, &CiEnvironment::default());

        assert!(result.is_ok());
        assert!(written_files(&config).is_empty());
    }

    #[test]
    fn no_affected_packages_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut source = MockAffectedSource::new();
        source
            .expect_affected_packages()
            .times(1)
            .returning(|| Ok(vec![]));

        let result =
            run(&source, &config, None, &CiEnvironment::default());

        assert!(result.is_ok());
        assert!(written_files(&config).is_empty());
    }

    #[test]
    fn fully_excluded_set_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut source = MockAffectedSource::new();
        source
            .expect_affected_packages()
            .times(1)
            .returning(|| Ok(vec![package("@repo/eslint-config")]));

        let result =
            run(&source, &config, None, &CiEnvironment::default());

        assert!(result.is_ok());
        assert!(written_files(&config).is_empty());
    }

    #[test]
    fn writes_changeset_for_surviving_packages() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let mut source = MockAffectedSource::new();
        source.expect_affected_packages().times(1).returning(|| {
            Ok(vec![
                package("@repo/ui"),
                package("@repo/eslint-config"),
            ])
        });

        let env = CiEnvironment {
            pr_number: Some(42),
            repository: Some("org/repo".to_string()),
            step_summary_path: None,
        };

        let result = run(&source, &config, Some("Tweak button"), &env);
        assert!(result.is_ok());

        let files = written_files(&config);
        assert_eq!(files.len(), 1);

        let content = std::fs::read_to_string(&files[0]).unwrap();
        assert!(content.contains("\"@repo/ui\": minor"));
        assert!(!content.contains("eslint-config"));
        assert!(
            content
                .contains("[#42](https://github.com/org/repo/pull/42)")
        );
        assert!(content.ends_with("Tweak button\n"));
    }

    #[test]
    fn defaults_description_when_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let config = ChangesetConfig {
            bump: Bump::Patch,
            ..config_in(&dir)
        };

        let mut source = MockAffectedSource::new();
        source
            .expect_affected_packages()
            .times(1)
            .returning(|| Ok(vec![package("web")]));

        let result =
            run(&source, &config, None, &CiEnvironment::default());
        assert!(result.is_ok());

        let files = written_files(&config);
        let content = std::fs::read_to_string(&files[0]).unwrap();
        assert!(content.contains("\"web\": patch"));
        assert!(content.contains(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn write_failure_is_fatal() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let config = ChangesetConfig {
            // A file where the directory should be makes the write fail.
            dir: blocker.path().to_str().unwrap().to_string(),
            ..Default::default()
        };

        let mut source = MockAffectedSource::new();
        source
            .expect_affected_packages()
            .times(1)
            .returning(|| Ok(vec![package("@repo/ui")]));

        let result =
            run(&source, &config, None, &CiEnvironment::default());

        assert!(result.is_err());
    }
}
