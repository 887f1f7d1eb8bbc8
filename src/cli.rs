//! CLI argument parsing with environment fallbacks.
use clap::Parser;
use std::time::Duration;

use crate::{
    config::{
        DEFAULT_EXCLUDE_LABELS, DEFAULT_RELEASE_DAYS,
        DEFAULT_SERVER_URL, DEFAULT_SETTLE_DELAY_SECS, ExclusionLabels,
        PromoterConfig,
    },
    error::{AutoReleaseError, Result},
};

/// Promote the latest GitHub draft release once it is old enough and only
/// contains dependency upgrades.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "")]
    /// Repository in owner/name form.
    pub repository: String,

    #[arg(long, env = "RELEASE_DAYS", default_value = "")]
    /// Minimum draft age, in days, before it may be auto-released.
    /// Defaults to 7.
    pub release_days: String,

    #[arg(long, env = "EXCLUDE_LABELS", default_value = DEFAULT_EXCLUDE_LABELS)]
    /// Comma-separated labels that block auto-release when found in the
    /// release body.
    pub exclude_labels: String,

    #[arg(long, env = "ALL_LABELS", num_args = 0..=1, default_missing_value = "true")]
    /// Auto-release regardless of label. Any non-empty value enables it.
    pub all_labels: Option<String>,

    #[arg(long, env = "DRY_RUN", num_args = 0..=1, default_missing_value = "true")]
    /// Evaluate the latest draft without changing any release. Any non-empty
    /// value enables it.
    pub dry_run: Option<String>,

    #[arg(long, env = "SETTLE_DELAY_SECS", default_value_t = DEFAULT_SETTLE_DELAY_SECS)]
    /// Seconds to wait after publishing before deleting the temporary draft.
    pub settle_delay_secs: u64,

    #[arg(long, env = "GITHUB_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    /// Base URL of the GitHub instance hosting the repository.
    pub server_url: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

fn is_set(flag: &Option<String>) -> bool {
    flag.as_ref().is_some_and(|value| !value.is_empty())
}

impl Args {
    /// Resolve the immutable run configuration from parsed arguments.
    pub fn get_config(&self) -> Result<PromoterConfig> {
        let exclude_labels = if is_set(&self.all_labels) {
            ExclusionLabels::All
        } else if self.exclude_labels.is_empty() {
            ExclusionLabels::default()
        } else {
            ExclusionLabels::parse(&self.exclude_labels)
        };

        let release_days = if self.release_days.is_empty() {
            DEFAULT_RELEASE_DAYS
        } else {
            self.release_days.parse::<u32>().map_err(|e| {
                AutoReleaseError::invalid_config(format!(
                    "release days must be a non-negative integer, got {:?}: {e}",
                    self.release_days
                ))
            })?
        };

        PromoterConfig::builder()
            .repository(self.repository.clone())
            .release_days(release_days)
            .exclude_labels(exclude_labels)
            .dry_run(is_set(&self.dry_run))
            .settle_delay(Duration::from_secs(self.settle_delay_secs))
            .server_url(self.server_url.clone())
            .build()
    }
}
