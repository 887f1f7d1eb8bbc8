//! Access to the remote release store.
//!
//! The promoter only talks to the [`traits::ReleaseStore`] trait; the
//! GitHub implementation drives the `gh` CLI.

/// GitHub release store backed by the `gh` command line tool.
pub mod github_cli;

/// Data types for release listings, release content and create requests.
pub mod request;

/// Common trait for release store abstraction.
pub mod traits;
