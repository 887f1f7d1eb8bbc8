//! Implements the ReleaseStore trait by shelling out to the GitHub CLI
use async_trait::async_trait;
use log::*;
use tokio::process::Command;

use crate::{
    config::PromoterConfig,
    error::{AutoReleaseError, Result},
    forge::{
        request::{
            CreateReleaseRequest, ReleaseDetail, ReleaseStatus,
            ReleaseSummary,
        },
        traits::ReleaseStore,
    },
};

/// JSON fields requested when viewing a single release.
const VIEW_FIELDS: &str = "body,targetCommitish,isDraft";

/// Release store backed by `gh release` subcommands. Authentication is left
/// to `gh` itself (GH_TOKEN / GITHUB_TOKEN or a prior `gh auth login`).
pub struct GithubCli {
    program: String,
    repository_url: String,
}

impl GithubCli {
    pub fn new(config: &PromoterConfig) -> Self {
        Self {
            program: "gh".into(),
            repository_url: config.repository_url.to_string(),
        }
    }

    fn list_args(&self) -> Vec<String> {
        vec![
            "release".into(),
            "-R".into(),
            self.repository_url.clone(),
            "list".into(),
        ]
    }

    fn view_args(&self, tag: &str) -> Vec<String> {
        vec![
            "release".into(),
            "-R".into(),
            self.repository_url.clone(),
            "view".into(),
            tag.into(),
            "--json".into(),
            VIEW_FIELDS.into(),
        ]
    }

    fn create_args(&self, req: &CreateReleaseRequest) -> Vec<String> {
        let mut args: Vec<String> =
            vec!["release".into(), "create".into(), req.tag.clone()];

        if req.draft {
            args.push("-d".into());
        }

        args.extend([
            "-R".into(),
            self.repository_url.clone(),
            "-t".into(),
            req.title.clone(),
            "-n".into(),
            req.notes.clone(),
            "--target".into(),
            req.target.clone(),
        ]);

        args
    }

    fn delete_args(&self, tag: &str) -> Vec<String> {
        vec![
            "release".into(),
            "delete".into(),
            tag.into(),
            "-R".into(),
            self.repository_url.clone(),
            "--yes".into(),
        ]
    }

    /// Runs `gh` to completion and returns its stdout. A non-zero exit is
    /// fatal; whatever the command printed is logged and kept in the error.
    async fn run(&self, args: &[String]) -> Result<String> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!("running: {command}");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                AutoReleaseError::forge(format!(
                    "failed to execute {}: {e}",
                    self.program
                ))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            let combined = format!("{stdout}{stderr}");
            for line in combined.lines() {
                error!("{line}");
            }
            return Err(AutoReleaseError::CommandFailed {
                command,
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(stdout)
    }
}

/// Parses tab-separated `gh release list` output. Columns are tag, status,
/// title and date; anything past the fourth column is ignored.
pub fn parse_release_list(output: &str) -> Result<Vec<ReleaseSummary>> {
    let mut releases = vec![];

    for line in output.lines() {
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();

        if columns.len() < 4 {
            return Err(AutoReleaseError::MalformedReleaseRow(line.to_string()));
        }

        releases.push(ReleaseSummary {
            tag: columns[0].to_string(),
            status: ReleaseStatus::from(columns[1]),
            title: columns[2].to_string(),
            published: columns[3].to_string(),
        });
    }

    Ok(releases)
}

fn echo_output(output: &str) {
    for line in output.lines() {
        info!("{line}");
    }
}

#[async_trait]
impl ReleaseStore for GithubCli {
    async fn list_releases(&self) -> Result<Vec<ReleaseSummary>> {
        let output = self.run(&self.list_args()).await?;
        parse_release_list(&output)
    }

    async fn get_release(&self, tag: &str) -> Result<ReleaseDetail> {
        let output = self.run(&self.view_args(tag)).await?;
        let detail: ReleaseDetail = serde_json::from_str(&output)?;
        Ok(detail)
    }

    async fn create_release(&self, req: CreateReleaseRequest) -> Result<()> {
        let output = self.run(&self.create_args(&req)).await?;
        echo_output(&output);
        Ok(())
    }

    async fn delete_release(&self, tag: &str) -> Result<()> {
        let output = self.run(&self.delete_args(tag)).await?;
        echo_output(&output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_config;

    fn cli() -> GithubCli {
        GithubCli::new(&create_test_config())
    }

    #[test]
    fn parses_release_list_rows() {
        let output = "v1.4.0\tDraft\tv1.4.0\t2024-01-01T00:00:00Z\n\
                      v1.3.0\tLatest\tv1.3.0\t2023-12-01T00:00:00Z\n\
                      v1.2.0\t\tv1.2.0\t2023-11-01T00:00:00Z\n";

        let releases = parse_release_list(output).unwrap();

        assert_eq!(releases.len(), 3);
        assert_eq!(releases[0].tag, "v1.4.0");
        assert_eq!(releases[0].status, ReleaseStatus::Draft);
        assert_eq!(releases[0].title, "v1.4.0");
        assert_eq!(releases[0].published, "2024-01-01T00:00:00Z");
        assert_eq!(releases[1].status, ReleaseStatus::Latest);
        assert_eq!(releases[2].status, ReleaseStatus::Published);
    }

    #[test]
    fn parses_empty_release_list() {
        assert!(parse_release_list("").unwrap().is_empty());
        assert!(parse_release_list("\n\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_short_release_row() {
        let result = parse_release_list("v1.0.0\tDraft\n");
        assert!(matches!(
            result,
            Err(AutoReleaseError::MalformedReleaseRow(_))
        ));
    }

    #[test]
    fn keeps_unknown_status_verbatim() {
        let releases =
            parse_release_list("v1\tWeird\tv1\t2024-01-01T00:00:00Z").unwrap();
        assert_eq!(releases[0].status, ReleaseStatus::Other("Weird".into()));
    }

    #[test]
    fn deserializes_release_detail() {
        let json = r####"{"body":"### Dependency Upgrades\n- bump","targetCommitish":"main","isDraft":true}"####;
        let detail: ReleaseDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.body, "### Dependency Upgrades\n- bump");
        assert_eq!(detail.target_commitish, "main");
        assert!(detail.is_draft);
    }

    #[test]
    fn builds_list_and_view_args() {
        let cli = cli();

        assert_eq!(
            cli.list_args(),
            vec!["release", "-R", "https://github.com/org/repo.git", "list"]
        );
        assert_eq!(
            cli.view_args("v1.4.0"),
            vec![
                "release",
                "-R",
                "https://github.com/org/repo.git",
                "view",
                "v1.4.0",
                "--json",
                "body,targetCommitish,isDraft",
            ]
        );
    }

    #[test]
    fn builds_create_args_for_draft_and_published() {
        let cli = cli();
        let mut req = CreateReleaseRequest {
            tag: "v1.4.0-temp".into(),
            title: "v1.4.0-temp".into(),
            notes: "notes".into(),
            target: "main".into(),
            draft: true,
        };

        assert_eq!(
            cli.create_args(&req),
            vec![
                "release",
                "create",
                "v1.4.0-temp",
                "-d",
                "-R",
                "https://github.com/org/repo.git",
                "-t",
                "v1.4.0-temp",
                "-n",
                "notes",
                "--target",
                "main",
            ]
        );

        req.draft = false;
        assert!(!cli.create_args(&req).contains(&"-d".to_string()));
    }

    #[tokio::test]
    async fn missing_program_is_a_forge_error() {
        let cli = GithubCli {
            program: "draft-autorelease-no-such-gh".into(),
            repository_url: "https://github.com/org/repo.git".into(),
        };

        let err = cli.list_releases().await.unwrap_err();

        assert!(matches!(err, AutoReleaseError::ForgeError(_)));
        assert!(err.to_string().contains("draft-autorelease-no-such-gh"));
    }

    #[test]
    fn builds_delete_args() {
        assert_eq!(
            cli().delete_args("v1.4.0"),
            vec![
                "release",
                "delete",
                "v1.4.0",
                "-R",
                "https://github.com/org/repo.git",
                "--yes",
            ]
        );
    }
}
