//! Configuration loading and parsing for `shipwright.toml` files.
//!
//! All policy that operators tune — exclusion patterns, bump severity,
//! release prefixes — lives here, so neither command hard-codes it.
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::result::Result;
use color_eyre::eyre::WrapErr;

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "shipwright.toml";

/// Directory changesets are written into, relative to the repo root.
pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";

/// Semantic-versioning bump severity applied to affected packages.
///
/// One globally configured value per run; there is no per-package
/// differentiation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bump {
    Major,
    #[default]
    Minor,
    Patch,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bump::Major => write!(f, "major"),
            Bump::Minor => write!(f, "minor"),
            Bump::Patch => write!(f, "patch"),
        }
    }
}

/// Policy for the `changeset` subcommand.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChangesetConfig {
    /// Directory changeset files are written to.
    pub dir: String,
    /// Bump severity recorded for every affected package.
    pub bump: Bump,
    /// Packages whose name contains any of these substrings are
    /// excluded from the changeset.
    pub exclude: Vec<String>,
}

impl Default for ChangesetConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_CHANGESET_DIR.to_string(),
            bump: Bump::Minor,
            exclude: vec![
                "eslint-config".to_string(),
                "typescript-config".to_string(),
            ],
        }
    }
}

/// Policy for the `publish` subcommand.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Tags starting with any of these prefixes get a GitHub release.
    /// Everything else (shared libraries, internal packages) is
    /// versioned but not released.
    pub release_prefixes: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            release_prefixes: vec!["docs@".to_string(), "web@".to_string()],
        }
    }
}

/// Root configuration structure for `shipwright.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changeset generation policy.
    pub changeset: ChangesetConfig,
    /// Release publication policy.
    pub publish: PublishConfig,
}

impl Config {
    /// Load configuration from the given path, or from
    /// `shipwright.toml` when no path is supplied.
    ///
    /// A missing default file yields the shipped defaults. An
    /// explicitly requested file that cannot be read is an error, as
    /// is unparsable TOML in either case.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let (file, explicit) = match path {
            Some(path) => (path, true),
            None => (DEFAULT_CONFIG_FILE, false),
        };

        if !Path::new(file).exists() {
            if explicit {
                return Err(color_eyre::eyre::eyre!(
                    "config file not found: {file}"
                ));
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(file)
            .wrap_err_with(|| format!("failed to read config file: {file}"))?;

        let config: Self = toml::from_str(&content)
            .wrap_err_with(|| format!("failed to parse config file: {file}"))?;

        Ok(config)
    }
}
