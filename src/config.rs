//! Immutable run configuration for draft promotion.
use derive_builder::Builder;
use regex::Regex;
use std::{sync::LazyLock, time::Duration};
use url::Url;

use crate::error::{AutoReleaseError, Result};

/// Default minimum age of a draft, in days, before it may be promoted.
pub const DEFAULT_RELEASE_DAYS: u32 = 7;
/// Default labels whose presence in a release body blocks auto-release.
pub const DEFAULT_EXCLUDE_LABELS: &str = "Documentation,Features,Bug Fixes";
/// Default delay between publishing and deleting the temporary draft.
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 5;
/// Default GitHub host used to build repository URLs.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";
/// Heading a release body must contain to be considered upgrades-only.
pub const UPGRADE_MARKER: &str = " Dependency Upgrades";
/// Suffix appended to a tag to name its temporary draft copy.
pub const TEMP_TAG_SUFFIX: &str = "-temp";

static REPOSITORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").unwrap()
});

/// Labels that block auto-release when found in a release body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionLabels {
    /// Any of these substrings in the body blocks auto-release.
    Labels(Vec<String>),
    /// Label checking is disabled, every category may be auto-released.
    All,
}

impl ExclusionLabels {
    /// Parses a comma-separated label list. Segments keep surrounding
    /// whitespace, empty segments are dropped.
    pub fn parse(raw: &str) -> Self {
        let labels = raw
            .split(',')
            .filter(|label| !label.is_empty())
            .map(String::from)
            .collect();
        ExclusionLabels::Labels(labels)
    }

    /// Returns every configured label that appears anywhere in `body`.
    pub fn matches(&self, body: &str) -> Vec<String> {
        match self {
            ExclusionLabels::All => vec![],
            ExclusionLabels::Labels(labels) => labels
                .iter()
                .filter(|label| body.contains(label.as_str()))
                .cloned()
                .collect(),
        }
    }
}

impl Default for ExclusionLabels {
    fn default() -> Self {
        Self::parse(DEFAULT_EXCLUDE_LABELS)
    }
}

#[derive(Debug, Builder)]
#[builder(setter(into), build_fn(private, name = "_build"))]
pub struct PromoterConfigParams {
    pub repository: String,
    #[builder(default = "DEFAULT_RELEASE_DAYS")]
    pub release_days: u32,
    #[builder(default)]
    pub exclude_labels: ExclusionLabels,
    #[builder(default)]
    pub dry_run: bool,
    #[builder(default = "Duration::from_secs(DEFAULT_SETTLE_DELAY_SECS)")]
    pub settle_delay: Duration,
    #[builder(default = "DEFAULT_SERVER_URL.to_string()")]
    pub server_url: String,
}

impl PromoterConfigParamsBuilder {
    pub fn build(&self) -> Result<PromoterConfig> {
        let params = self._build().map_err(|e| {
            AutoReleaseError::invalid_config(format!(
                "Failed to build promoter config: {}",
                e
            ))
        })?;
        PromoterConfig::new(params)
    }
}

/// Configuration resolved once at startup and shared, read-only, by the
/// eligibility checks and the promotion sequence.
#[derive(Debug, Clone)]
pub struct PromoterConfig {
    /// Repository identifier in `owner/name` form.
    pub repository: String,
    /// Clone URL passed to `gh -R`.
    pub repository_url: Url,
    pub release_days: u32,
    pub exclude_labels: ExclusionLabels,
    pub dry_run: bool,
    pub settle_delay: Duration,
}

impl PromoterConfig {
    pub fn builder() -> PromoterConfigParamsBuilder {
        PromoterConfigParamsBuilder::default()
    }

    pub fn new(params: PromoterConfigParams) -> Result<Self> {
        if params.repository.is_empty() {
            return Err(AutoReleaseError::MissingRepository);
        }

        if !REPOSITORY_REGEX.is_match(&params.repository) {
            return Err(AutoReleaseError::invalid_config(format!(
                "repository must be in owner/name form: {}",
                params.repository
            )));
        }

        let repository_url =
            Self::resolve_repository_url(&params.server_url, &params.repository)?;

        Ok(Self {
            repository: params.repository,
            repository_url,
            release_days: params.release_days,
            exclude_labels: params.exclude_labels,
            dry_run: params.dry_run,
            settle_delay: params.settle_delay,
        })
    }

    fn resolve_repository_url(server_url: &str, repository: &str) -> Result<Url> {
        let mut base = Url::parse(server_url)?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(base.join(&format!("{repository}.git"))?)
    }
}
