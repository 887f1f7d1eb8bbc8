use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Publication status column of a release listing.
pub enum ReleaseStatus {
    Draft,
    Latest,
    PreRelease,
    Published,
    Other(String),
}

impl From<&str> for ReleaseStatus {
    fn from(value: &str) -> Self {
        match value {
            "Draft" => ReleaseStatus::Draft,
            "Latest" => ReleaseStatus::Latest,
            "Pre-release" => ReleaseStatus::PreRelease,
            "" => ReleaseStatus::Published,
            other => ReleaseStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the release listing, latest first.
pub struct ReleaseSummary {
    pub tag: String,
    pub status: ReleaseStatus,
    /// Display title, kept for logging; promotion titles releases by tag
    pub title: String,
    /// Raw date column, parsed only once the release is known to be a draft
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Release content fetched by tag.
pub struct ReleaseDetail {
    pub body: String,
    #[serde(rename = "targetCommitish")]
    pub target_commitish: String,
    #[serde(rename = "isDraft")]
    pub is_draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a release.
pub struct CreateReleaseRequest {
    pub tag: String,
    pub title: String,
    pub notes: String,
    pub target: String,
    pub draft: bool,
}
