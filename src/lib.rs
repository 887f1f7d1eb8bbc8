pub mod cli;
pub mod config;
pub mod error;
pub mod forge;
pub mod promoter;

pub use cli::Args;
pub use config::{ExclusionLabels, PromoterConfig};
pub use error::{AutoReleaseError, Result};
pub use forge::{github_cli::GithubCli, traits::ReleaseStore};
pub use promoter::{Outcome, Promoter};

#[cfg(test)]
pub mod test_helpers;
