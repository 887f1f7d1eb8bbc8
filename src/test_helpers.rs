//! Common test helper functions shared across test modules.
use std::time::Duration;

use crate::{
    config::PromoterConfig,
    forge::request::{ReleaseDetail, ReleaseStatus, ReleaseSummary},
};

/// Creates a test PromoterConfig for `org/repo` with default labels, a
/// 7 day threshold and no settle delay.
pub fn create_test_config() -> PromoterConfig {
    PromoterConfig::builder()
        .repository("org/repo")
        .settle_delay(Duration::ZERO)
        .build()
        .unwrap()
}

/// Creates a release listing row whose title matches its tag.
pub fn create_summary(
    tag: &str,
    status: ReleaseStatus,
    published: &str,
) -> ReleaseSummary {
    ReleaseSummary {
        tag: tag.to_string(),
        status,
        title: tag.to_string(),
        published: published.to_string(),
    }
}

/// Creates draft release content targeting `main`.
pub fn create_detail(body: &str) -> ReleaseDetail {
    ReleaseDetail {
        body: body.to_string(),
        target_commitish: "main".to_string(),
        is_draft: true,
    }
}
