//! Decides whether the latest release is a draft that may be auto-released.
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use log::*;

use crate::{
    config::{ExclusionLabels, UPGRADE_MARKER},
    error::{AutoReleaseError, Result},
    forge::request::{ReleaseDetail, ReleaseStatus, ReleaseSummary},
};

/// Only accepted format for release dates: ISO-8601 with a `Z` designator.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Result of checking the release listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingCheck<'a> {
    NoReleases,
    NotDraft { tag: String },
    TooYoung { tag: String, published: DateTime<Utc> },
    /// Draft old enough to have its content inspected.
    AgedDraft(&'a ReleaseSummary),
}

/// Result of checking the content of an aged draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCheck {
    NoUpgrades,
    /// Upgrades are present alongside labels that need a human decision.
    ExcludedLabels(Vec<String>),
    UpgradesOnly,
}

pub fn parse_release_date(raw: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, RELEASE_DATE_FORMAT)?;
    Ok(naive.and_utc())
}

/// Checks the first (latest) row of the release listing. A draft is old
/// enough once its date is at or before `now - release_days`.
pub fn check_listing(
    releases: &[ReleaseSummary],
    now: DateTime<Utc>,
    release_days: u32,
) -> Result<ListingCheck<'_>> {
    let Some(latest) = releases.first() else {
        return Ok(ListingCheck::NoReleases);
    };

    info!("most recent release:");
    info!("- version: {}", latest.tag);
    info!("- title: {}", latest.title);
    info!("- date: {}", latest.published);

    if latest.status != ReleaseStatus::Draft {
        return Ok(ListingCheck::NotDraft {
            tag: latest.tag.clone(),
        });
    }

    let published = parse_release_date(&latest.published)?;
    let cutoff = TimeDelta::try_days(i64::from(release_days))
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or_else(|| {
            AutoReleaseError::invalid_config(format!(
                "release days {release_days} is out of range for dates"
            ))
        })?;

    if published > cutoff {
        return Ok(ListingCheck::TooYoung {
            tag: latest.tag.clone(),
            published,
        });
    }

    Ok(ListingCheck::AgedDraft(latest))
}

/// Checks the fetched content of an aged draft. The draft flag must still be
/// set: losing it means something else modified the release mid-run.
pub fn check_content(
    tag: &str,
    detail: &ReleaseDetail,
    exclude_labels: &ExclusionLabels,
) -> Result<ContentCheck> {
    if !detail.is_draft {
        return Err(AutoReleaseError::DraftInconsistency {
            tag: tag.to_string(),
        });
    }

    info!("release target: {}", detail.target_commitish);
    info!("release body: |");
    for line in detail.body.split('\n') {
        info!("\t{line}");
    }

    if !detail.body.contains(UPGRADE_MARKER) {
        return Ok(ContentCheck::NoUpgrades);
    }

    info!("dependency upgrades found");
    debug!("looking for labels other than dependency upgrades");

    let matched = exclude_labels.matches(&detail.body);

    for label in matched.iter() {
        warn!("found label: {label}, disabling auto-release");
    }

    if matched.is_empty() {
        Ok(ContentCheck::UpgradesOnly)
    } else {
        Ok(ContentCheck::ExcludedLabels(matched))
    }
}
