//! Traits related to remote release stores
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::request::{CreateReleaseRequest, ReleaseDetail, ReleaseSummary},
};

/// Release operations needed to promote a draft. The store offers no way to
/// clear a draft flag in place, so promotion is built from these four.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseStore: Send + Sync {
    /// Lists releases, most recent first.
    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>>;
    async fn get_release(&self, tag: &str) -> Result<ReleaseDetail>;
    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()>;
    async fn delete_release(&self, tag: &str) -> Result<()>;
}
