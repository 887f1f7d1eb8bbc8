//! Publishes a draft release under its own tag.
//!
//! The release store cannot clear a draft flag in place, so the draft is
//! replaced instead:
//!
//! ```text
//! DraftExists --create T-temp--> TempDraftCreated --delete T--> OriginalDeleted
//!   --create T (published)--> Published --wait, delete T-temp--> Complete
//! ```
//!
//! The original draft is only deleted once a copy of its content exists
//! under the temporary tag. A failing step aborts the run; nothing is rolled
//! back and the error names the state that was left behind.
use log::*;
use std::time::Duration;

use crate::{
    config::TEMP_TAG_SUFFIX,
    error::{AutoReleaseError, PromotionStep, Result},
    forge::{
        request::{CreateReleaseRequest, ReleaseDetail},
        traits::ReleaseStore,
    },
};

/// Where the promotion of one tag currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionState {
    DraftExists,
    TempDraftCreated,
    OriginalDeleted,
    Published,
    Complete,
}

impl PromotionState {
    /// Step that moves out of this state, `None` once complete.
    pub fn next_step(&self) -> Option<PromotionStep> {
        match self {
            PromotionState::DraftExists => Some(PromotionStep::CreateTempDraft),
            PromotionState::TempDraftCreated => {
                Some(PromotionStep::DeleteOriginalDraft)
            }
            PromotionState::OriginalDeleted => {
                Some(PromotionStep::RecreateRelease)
            }
            PromotionState::Published => Some(PromotionStep::DeleteTempDraft),
            PromotionState::Complete => None,
        }
    }

    fn advance(&self) -> Self {
        match self {
            PromotionState::DraftExists => PromotionState::TempDraftCreated,
            PromotionState::TempDraftCreated => PromotionState::OriginalDeleted,
            PromotionState::OriginalDeleted => PromotionState::Published,
            PromotionState::Published | PromotionState::Complete => {
                PromotionState::Complete
            }
        }
    }
}

pub fn temp_tag(tag: &str) -> String {
    format!("{tag}{TEMP_TAG_SUFFIX}")
}

pub struct PromotionSequence<'a> {
    store: &'a dyn ReleaseStore,
    tag: String,
    temp_tag: String,
    notes: String,
    target: String,
    settle_delay: Duration,
    state: PromotionState,
}

impl<'a> PromotionSequence<'a> {
    pub fn new(
        store: &'a dyn ReleaseStore,
        tag: &str,
        detail: &ReleaseDetail,
        settle_delay: Duration,
    ) -> Self {
        Self {
            store,
            tag: tag.to_string(),
            temp_tag: temp_tag(tag),
            notes: detail.body.clone(),
            target: detail.target_commitish.clone(),
            settle_delay,
            state: PromotionState::DraftExists,
        }
    }

    pub fn state(&self) -> PromotionState {
        self.state
    }

    /// Runs every remaining step in order.
    pub async fn run(&mut self) -> Result<()> {
        while let Some(step) = self.state.next_step() {
            self.execute(step).await.map_err(|e| {
                AutoReleaseError::promotion_failed(&self.tag, step, e)
            })?;
            self.state = self.state.advance();
        }

        info!("release {} published", self.tag);

        Ok(())
    }

    async fn execute(&self, step: PromotionStep) -> Result<()> {
        match step {
            PromotionStep::CreateTempDraft => {
                info!("creating temporary draft release {}", self.temp_tag);
                self.store
                    .create_release(self.request(&self.temp_tag, true))
                    .await
            }
            PromotionStep::DeleteOriginalDraft => {
                info!("deleting original draft release {}", self.tag);
                self.store.delete_release(&self.tag).await
            }
            PromotionStep::RecreateRelease => {
                info!("recreating release {} without draft status", self.tag);
                self.store
                    .create_release(self.request(&self.tag, false))
                    .await
            }
            PromotionStep::DeleteTempDraft => {
                info!("waiting {:?}", self.settle_delay);
                tokio::time::sleep(self.settle_delay).await;
                info!("deleting temporary draft release {}", self.temp_tag);
                self.store.delete_release(&self.temp_tag).await
            }
        }
    }

    fn request(&self, tag: &str, draft: bool) -> CreateReleaseRequest {
        CreateReleaseRequest {
            tag: tag.to_string(),
            title: tag.to_string(),
            notes: self.notes.clone(),
            target: self.target.clone(),
            draft,
        }
    }
}
