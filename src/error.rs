//! Custom error types for draft-autorelease.

use std::fmt;

use thiserror::Error;

/// Steps of the draft promotion sequence, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionStep {
    CreateTempDraft,
    DeleteOriginalDraft,
    RecreateRelease,
    DeleteTempDraft,
}

impl PromotionStep {
    /// Describes what is left in the release store when this step fails.
    pub fn leaves_behind(&self) -> &'static str {
        match self {
            PromotionStep::CreateTempDraft => {
                "original draft is untouched, nothing to clean up"
            }
            PromotionStep::DeleteOriginalDraft => {
                "both the original draft and the temporary draft exist, delete the temporary draft by hand"
            }
            PromotionStep::RecreateRelease => {
                "original tag has no release, its content is preserved in the temporary draft"
            }
            PromotionStep::DeleteTempDraft => {
                "release was published but the temporary draft still exists, delete it by hand"
            }
        }
    }
}

impl fmt::Display for PromotionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromotionStep::CreateTempDraft => "create temporary draft",
            PromotionStep::DeleteOriginalDraft => "delete original draft",
            PromotionStep::RecreateRelease => "recreate published release",
            PromotionStep::DeleteTempDraft => "delete temporary draft",
        };
        write!(f, "{name}")
    }
}

/// Main error type for draft-autorelease operations.
#[derive(Error, Debug)]
pub enum AutoReleaseError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Blank repository provided: set GITHUB_REPOSITORY or --repository")]
    MissingRepository,

    // Release store errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("Command `{command}` failed ({status}):\n{output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    #[error("Malformed release list row: {0:?}")]
    MalformedReleaseRow(String),

    #[error(
        "Release {tag} is no longer a draft: it was modified while being evaluated"
    )]
    DraftInconsistency { tag: String },

    #[error("Promotion of {tag} failed at step '{step}': {}: {source}", .step.leaves_behind())]
    PromotionFailed {
        tag: String,
        step: PromotionStep,
        #[source]
        source: Box<AutoReleaseError>,
    },

    // Parsing errors - automatic conversions via #[from]
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Datetime parse error: {0}")]
    ChronoParseError(#[from] chrono::ParseError),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using AutoReleaseError
pub type Result<T> = std::result::Result<T, AutoReleaseError>;

impl AutoReleaseError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Wrap a failure of one promotion step with the tag being promoted
    pub fn promotion_failed(
        tag: impl Into<String>,
        step: PromotionStep,
        source: AutoReleaseError,
    ) -> Self {
        Self::PromotionFailed {
            tag: tag.into(),
            step,
            source: Box::new(source),
        }
    }
}
