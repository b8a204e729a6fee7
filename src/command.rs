//! Command execution for Shipwright.
//!
//! Each subcommand is one stage of the release pipeline, connected to
//! the other only through the filesystem and git state:
//!
//! - **changeset**: runs on a pull request, records the intended
//!   version bump for affected packages.
//! - **publish**: runs after the versioning tool has tagged HEAD,
//!   turns eligible tags into GitHub releases.
//!
//! Both commands keep their core flow behind the capability traits
//! (`AffectedSource`, `TagSource`, `ReleasePublisher`) so tests run
//! without spawning real subprocesses; the `execute` entry points wire
//! in the production implementations.

/// Changeset generation from affected packages.
pub mod changeset;

/// Tag scanning and release publication.
pub mod publish;
