//! GitHub REST client for the PR facts behind the process metrics

use serde::Deserialize;

use crate::error::AuditError;
use crate::metrics::{PrInfo, ReviewInfo, WorkflowRun};

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Minimal REST client scoped to the three lookups the metrics need.
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    api_base: String,
}

#[derive(Deserialize)]
struct PullRequestWire {
    number: u64,
    created_at: chrono::DateTime<chrono::Utc>,
    merged_at: Option<chrono::DateTime<chrono::Utc>>,
    head: HeadWire,
}

#[derive(Deserialize)]
struct HeadWire {
    sha: String,
}

#[derive(Deserialize)]
struct ReviewWire {
    state: String,
    submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Deserialize)]
struct WorkflowRunsWire {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

impl GitHubClient {
    /// Build a client from `GITHUB_TOKEN`
    pub fn from_env() -> Result<Self, AuditError> {
        let token =
            std::env::var("GITHUB_TOKEN").map_err(|_| AuditError::MissingEnv("GITHUB_TOKEN"))?;
        Self::new(token)
    }

    /// Build a client with an explicit token
    pub fn new(token: impl Into<String>) -> Result<Self, AuditError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("repoaudit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (tests, GHE)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, AuditError> {
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuditError::GitHub(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetch the PR facts needed for the time metrics
    pub async fn pull_request(&self, repo: &str, number: u64) -> Result<PrInfo, AuditError> {
        let wire: PullRequestWire = self
            .get(format!("{}/repos/{}/pulls/{}", self.api_base, repo, number))
            .await?;

        Ok(PrInfo {
            number: wire.number,
            created_at: wire.created_at,
            merged_at: wire.merged_at,
            head_sha: wire.head.sha,
        })
    }

    /// Fetch the submitted reviews on a PR
    pub async fn pull_request_reviews(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<ReviewInfo>, AuditError> {
        let wire: Vec<ReviewWire> = self
            .get(format!(
                "{}/repos/{}/pulls/{}/reviews",
                self.api_base, repo, number
            ))
            .await?;

        Ok(wire
            .into_iter()
            .filter_map(|r| {
                r.submitted_at.map(|submitted_at| ReviewInfo {
                    state: r.state,
                    submitted_at,
                })
            })
            .collect())
    }

    /// Fetch the runs of one workflow for a head SHA, oldest first
    pub async fn workflow_runs(
        &self,
        repo: &str,
        workflow: &str,
        head_sha: &str,
    ) -> Result<Vec<WorkflowRun>, AuditError> {
        let wire: WorkflowRunsWire = self
            .get(format!(
                "{}/repos/{}/actions/workflows/{}/runs?per_page=50",
                self.api_base, repo, workflow
            ))
            .await?;

        let mut runs: Vec<WorkflowRun> = wire
            .workflow_runs
            .into_iter()
            .filter(|run| run.head_sha == head_sha)
            .collect();
        runs.sort_by_key(|run| run.created_at);

        Ok(runs)
    }
}
