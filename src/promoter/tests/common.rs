//! Common test utilities for promoter tests.

use chrono::{DateTime, Utc};

use crate::{
    config::PromoterConfig,
    forge::{
        request::{ReleaseDetail, ReleaseStatus},
        traits::MockReleaseStore,
    },
    promoter::eligibility::parse_release_date,
    test_helpers::{create_detail, create_summary},
};

pub const TEST_TAG: &str = "v1.4.0";
pub const TEST_TEMP_TAG: &str = "v1.4.0-temp";
pub const UPGRADES_BODY: &str = "### Dependency Upgrades\n- bump lib X";

/// Fixed "now" used by every workflow test.
pub fn test_now() -> DateTime<Utc> {
    parse_release_date("2024-01-10T00:00:00Z").unwrap()
}

/// Expects a single listing call returning one release row.
pub fn expect_latest(
    store: &mut MockReleaseStore,
    status: ReleaseStatus,
    published: &'static str,
) {
    store.expect_list_releases().times(1).returning(move || {
        Ok(vec![create_summary(TEST_TAG, status.clone(), published)])
    });
}

/// Expects a single view call for the test tag returning `body`.
pub fn expect_detail(store: &mut MockReleaseStore, body: &'static str) {
    store
        .expect_get_release()
        .times(1)
        .withf(|tag| tag == TEST_TAG)
        .returning(move |_| Ok(create_detail(body)));
}

/// Expects a single view call returning custom content.
pub fn expect_custom_detail(
    store: &mut MockReleaseStore,
    detail: ReleaseDetail,
) {
    store
        .expect_get_release()
        .times(1)
        .returning(move |_| Ok(detail.clone()));
}

/// Forbids any create or delete call.
pub fn expect_no_mutations(store: &mut MockReleaseStore) {
    store.expect_create_release().times(0);
    store.expect_delete_release().times(0);
}

/// Test config with dry run switched on.
pub fn dry_run_config() -> PromoterConfig {
    let mut config = crate::test_helpers::create_test_config();
    config.dry_run = true;
    config
}
