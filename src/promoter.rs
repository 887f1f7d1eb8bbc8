use chrono::{DateTime, Utc};
use log::*;

use crate::{
    config::{ExclusionLabels, PromoterConfig},
    error::Result,
    forge::traits::ReleaseStore,
    promoter::{
        eligibility::{ContentCheck, ListingCheck},
        sequence::PromotionSequence,
    },
};

pub mod eligibility;
pub mod sequence;


/// How a run ended. Every variant is a successful run; failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoReleases,
    NotDraft { tag: String },
    TooYoung { tag: String },
    NoUpgrades { tag: String },
    /// Draft has upgrades but also other categories, a human should release it.
    NotifyInstead { tag: String, labels: Vec<String> },
    DryRun { tag: String },
    Promoted { tag: String },
}

pub struct Promoter<'a> {
    config: &'a PromoterConfig,
    store: &'a dyn ReleaseStore,
}

impl<'a> Promoter<'a> {
    pub fn new(
        config: &'a PromoterConfig,
        store: &'a dyn ReleaseStore,
    ) -> Self {
        Self { config, store }
    }

    pub fn log_config(&self) {
        info!("repository: {}", self.config.repository);
        info!(
            "minimum draft age to auto-release: {} days",
            self.config.release_days
        );
        match &self.config.exclude_labels {
            ExclusionLabels::All => {
                info!("auto-releasing with all release categories")
            }
            ExclusionLabels::Labels(labels) => {
                info!(
                    "auto-release blocking categories: {}",
                    labels.join(", ")
                )
            }
        }
    }

    pub async fn run(&self) -> Result<Outcome> {
        self.run_at(Utc::now()).await
    }

    /// Evaluates the latest release as of `now` and promotes it if eligible.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<Outcome> {
        info!("getting releases for repository {}", self.config.repository);
        let releases = self.store.list_releases().await?;

        let listing = eligibility::check_listing(
            &releases,
            now,
            self.config.release_days,
        )?;

        let summary = match listing {
            ListingCheck::NoReleases => {
                info!("no releases detected, exiting");
                return Ok(Outcome::NoReleases);
            }
            ListingCheck::NotDraft { tag } => {
                info!("latest release ({tag}) is not a pending draft, exiting");
                return Ok(Outcome::NotDraft { tag });
            }
            ListingCheck::TooYoung { tag, published } => {
                info!(
                    "release {tag} not {} days old yet: {published}, exiting",
                    self.config.release_days
                );
                return Ok(Outcome::TooYoung { tag });
            }
            ListingCheck::AgedDraft(summary) => summary,
        };

        let tag = summary.tag.clone();

        info!("pulling data from draft release {tag}");
        let detail = self.store.get_release(&tag).await?;

        match eligibility::check_content(
            &tag,
            &detail,
            &self.config.exclude_labels,
        )? {
            ContentCheck::NoUpgrades => {
                info!(
                    "draft release does not contain formatted \"Dependency Upgrades\", exiting"
                );
                Ok(Outcome::NoUpgrades { tag })
            }
            // dry run wins over the label outcome, nothing is changed either way
            _ if self.config.dry_run => {
                warn!("dry_run: set, leaving draft release {tag} untouched");
                Ok(Outcome::DryRun { tag })
            }
            ContentCheck::ExcludedLabels(labels) => {
                warn!(
                    "draft release {tag} is not only dependency changes, notifications being sent instead"
                );
                Ok(Outcome::NotifyInstead { tag, labels })
            }
            ContentCheck::UpgradesOnly => {
                info!("no other types of release found");
                info!("draft release {tag} valid for auto-releasing");

                PromotionSequence::new(
                    self.store,
                    &tag,
                    &detail,
                    self.config.settle_delay,
                )
                .run()
                .await?;

                Ok(Outcome::Promoted { tag })
            }
        }
    }
}
