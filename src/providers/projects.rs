//! GitHub Projects v2 publishing client
//!
//! The [`ProjectsApi`] trait keeps the GraphQL transport behind a narrow,
//! mockable seam; [`publish_report`] holds the find-or-create-then-update
//! flow and is exercised in tests against an in-memory implementation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::error::AuditError;
use crate::report::{load_report, AuditReport};

const GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Where the summary lands: one logical item of one Project.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Org or user owning the project
    pub owner: String,
    /// Project v2 number
    pub project_number: u64,
    /// Logical key identifying the item (matched against title and body)
    pub item_key: String,
}

/// Severity totals published to the project item.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub trend: Option<String>,
}

impl PublishSummary {
    /// Extract the summary counts from a loaded report
    pub fn from_report(report: &AuditReport) -> Self {
        Self {
            total: report.summary.total,
            high: report.summary.by_severity.high,
            medium: report.summary.by_severity.medium,
            low: report.summary.by_severity.low,
            trend: None,
        }
    }
}

/// Access layer for GitHub Projects, mockable in tests.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Find the project item matching the logical key; `None` when absent
    async fn find_item_by_key(&self, cfg: &PublishConfig) -> Result<Option<String>, AuditError>;

    /// Create a new draft item and return its id
    async fn create_item(&self, cfg: &PublishConfig) -> Result<String, AuditError>;

    /// Update the item's custom fields and summary note
    async fn update_fields(
        &self,
        item_id: &str,
        fields: &Map<String, Value>,
        note: &str,
    ) -> Result<(), AuditError>;
}

/// Markdown note published into the item body.
pub fn build_note(summary: &PublishSummary) -> String {
    let mut lines = vec![
        "# Repo-Compliance Report".to_string(),
        String::new(),
        format!("- Total findings: {}", summary.total),
        format!("- High: {}", summary.high),
        format!("- Medium: {}", summary.medium),
        format!("- Low: {}", summary.low),
    ];
    if let Some(trend) = &summary.trend {
        lines.push(format!("- Trend vs previous sprint: **{trend}**"));
    }
    lines.join("\n")
}

/// Custom-field map published alongside the note.
pub fn build_fields(summary: &PublishSummary) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("high_count".to_string(), json!(summary.high));
    fields.insert("medium_count".to_string(), json!(summary.medium));
    fields.insert("low_count".to_string(), json!(summary.low));
    fields.insert("total_findings".to_string(), json!(summary.total));
    fields.insert(
        "trend".to_string(),
        json!(summary.trend.as_deref().unwrap_or("n/a")),
    );
    fields
}

/// Read `{"trend": "..."}` from an optional sidecar file.
pub fn load_trend(path: Option<&Path>) -> Option<String> {
    let path = path?;
    let content = std::fs::read_to_string(path).ok()?;
    let value: Value = serde_json::from_str(&content).ok()?;
    value.get("trend").and_then(|t| t.as_str()).map(str::to_string)
}

/// Retry an async operation with bounded exponential backoff.
pub async fn with_retry<T, F, Fut>(
    mut op: F,
    retries: u32,
    base_delay: Duration,
) -> Result<T, AuditError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AuditError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt > retries {
                    return Err(err);
                }
                let delay = base_delay * 2u32.pow(attempt - 1);
                warn!(error = %err, attempt, retries, "retrying after {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Publish one report summary to a project item, returning the item id.
///
/// The flow is idempotent over the logical key: an existing item is reused,
/// otherwise a draft item is created first. Each API call is retried with
/// exponential backoff before giving up.
pub async fn publish_report(
    api: &dyn ProjectsApi,
    cfg: &PublishConfig,
    report_path: &Path,
    trend_path: Option<&Path>,
) -> Result<String, AuditError> {
    info!(report = %report_path.display(), "loading report");
    let report = load_report(report_path)?;

    let mut summary = PublishSummary::from_report(&report);
    summary.trend = load_trend(trend_path);

    let note = build_note(&summary);
    let fields = build_fields(&summary);

    let retries = 3;
    let base_delay = Duration::from_secs(1);

    let item_id = match with_retry(|| api.find_item_by_key(cfg), retries, base_delay).await? {
        Some(id) => {
            info!(item_id = %id, key = %cfg.item_key, "updating existing item");
            id
        }
        None => {
            info!(key = %cfg.item_key, "no existing item found, creating");
            with_retry(|| api.create_item(cfg), retries, base_delay).await?
        }
    };

    with_retry(
        || api.update_fields(&item_id, &fields, &note),
        retries,
        base_delay,
    )
    .await?;
    info!(item_id = %item_id, "published report summary");

    Ok(item_id)
}

/// [`ProjectsApi`] implementation over the GitHub GraphQL v2 endpoint.
pub struct GraphQlProjectsApi {
    http: reqwest::Client,
    token: String,
    endpoint: String,
}

impl GraphQlProjectsApi {
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
            endpoint: GRAPHQL_ENDPOINT.to_string(),
        })
    }

    async fn execute(&self, query: &str, variables: Value) -> Result<Value, AuditError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuditError::GitHub(format!(
                "GraphQL endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        if let Some(errors) = body.get("errors") {
            return Err(AuditError::GitHub(format!("GraphQL errors: {errors}")));
        }

        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }

    async fn project_id(&self, cfg: &PublishConfig) -> Result<String, AuditError> {
        let query = r#"
            query($owner: String!, $number: Int!) {
              user(login: $owner) {
                projectV2(number: $number) { id }
              }
            }
        "#;

        let data = self
            .execute(
                query,
                json!({ "owner": cfg.owner, "number": cfg.project_number }),
            )
            .await?;

        data.pointer("/user/projectV2/id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AuditError::GitHub(format!(
                    "project {} not found for owner {}",
                    cfg.project_number, cfg.owner
                ))
            })
    }
}

#[async_trait]
impl ProjectsApi for GraphQlProjectsApi {
    async fn find_item_by_key(&self, cfg: &PublishConfig) -> Result<Option<String>, AuditError> {
        let project_id = self.project_id(cfg).await?;

        let query = r#"
            query($projectId: ID!, $first: Int!) {
              node(id: $projectId) {
                ... on ProjectV2 {
                  items(first: $first) {
                    nodes {
                      id
                      content {
                        ... on DraftIssue { id title body }
                      }
                    }
                  }
                }
              }
            }
        "#;

        let data = self
            .execute(query, json!({ "projectId": project_id, "first": 100 }))
            .await?;

        let items = data
            .pointer("/node/items/nodes")
            .and_then(|nodes| nodes.as_array())
            .cloned()
            .unwrap_or_default();

        for item in items {
            let content = &item["content"];
            let title = content["title"].as_str().unwrap_or_default();
            let body = content["body"].as_str().unwrap_or_default();

            if title.contains(&cfg.item_key) || body.contains(&cfg.item_key) {
                return Ok(content["id"].as_str().map(str::to_string));
            }
        }

        Ok(None)
    }

    async fn create_item(&self, cfg: &PublishConfig) -> Result<String, AuditError> {
        let project_id = self.project_id(cfg).await?;

        let mutation = r#"
            mutation($projectId: ID!, $title: String!, $body: String!) {
              addProjectV2DraftIssue(input: {
                projectId: $projectId
                title: $title
                body: $body
              }) {
                draftIssue { id }
              }
            }
        "#;

        let data = self
            .execute(
                mutation,
                json!({
                    "projectId": project_id,
                    "title": format!("Compliance Report - {}", cfg.item_key),
                    "body": format!("Key: {}\n\nInitial report placeholder.", cfg.item_key),
                }),
            )
            .await?;

        data.pointer("/addProjectV2DraftIssue/draftIssue/id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| AuditError::GitHub("draft issue creation returned no id".to_string()))
    }

    async fn update_fields(
        &self,
        item_id: &str,
        _fields: &Map<String, Value>,
        note: &str,
    ) -> Result<(), AuditError> {
        // Custom field updates need per-project field ids; the summary note
        // carries the same counts, so only the draft body is rewritten.
        let mutation = r#"
            mutation($itemId: ID!, $body: String!) {
              updateProjectV2DraftIssue(input: {
                draftIssueId: $itemId
                body: $body
              }) {
                draftIssue { id }
              }
            }
        "#;

        self.execute(mutation, json!({ "itemId": item_id, "body": note }))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn sample_summary() -> PublishSummary {
        PublishSummary {
            total: 4,
            high: 2,
            medium: 1,
            low: 1,
            trend: None,
        }
    }

    #[test]
    fn test_build_note_without_trend() {
        let note = build_note(&sample_summary());
        assert!(note.starts_with("# Repo-Compliance Report"));
        assert!(note.contains("- Total findings: 4"));
        assert!(note.contains("- High: 2"));
        assert!(!note.contains("Trend"));
    }

    #[test]
    fn test_build_note_with_trend() {
        let mut summary = sample_summary();
        summary.trend = Some("down".to_string());
        assert!(build_note(&summary).contains("Trend vs previous sprint: **down**"));
    }

    #[test]
    fn test_build_fields() {
        let fields = build_fields(&sample_summary());
        assert_eq!(fields["high_count"], 2);
        assert_eq!(fields["medium_count"], 1);
        assert_eq!(fields["low_count"], 1);
        assert_eq!(fields["total_findings"], 4);
        assert_eq!(fields["trend"], "n/a");
    }

    #[test]
    fn test_load_trend() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trends.json");
        fs::write(&path, r#"{"trend": "flat"}"#).unwrap();

        assert_eq!(load_trend(Some(&path)), Some("flat".to_string()));
        assert_eq!(load_trend(Some(&tmp.path().join("missing.json"))), None);
        assert_eq!(load_trend(None), None);
    }

    /// In-memory ProjectsApi recording the call sequence.
    struct MockProjectsApi {
        existing_item: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockProjectsApi {
        fn new(existing_item: Option<&str>) -> Self {
            Self {
                existing_item: existing_item.map(str::to_string),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProjectsApi for MockProjectsApi {
        async fn find_item_by_key(
            &self,
            _cfg: &PublishConfig,
        ) -> Result<Option<String>, AuditError> {
            self.calls.lock().unwrap().push("find".to_string());
            Ok(self.existing_item.clone())
        }

        async fn create_item(&self, _cfg: &PublishConfig) -> Result<String, AuditError> {
            self.calls.lock().unwrap().push("create".to_string());
            Ok("item-created".to_string())
        }

        async fn update_fields(
            &self,
            item_id: &str,
            fields: &Map<String, Value>,
            note: &str,
        ) -> Result<(), AuditError> {
            assert!(note.contains("Total findings"));
            assert!(fields.contains_key("total_findings"));
            self.calls
                .lock()
                .unwrap()
                .push(format!("update:{item_id}"));
            Ok(())
        }
    }

    fn write_report(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("report.json");
        fs::write(
            &path,
            r#"{
              "repo_root": "/repo",
              "summary": {"total": 1, "by_severity": {"High": 1, "Medium": 0, "Low": 0}},
              "findings": [
                {"rule_id": "SEC001", "message": "secret", "severity": "High"}
              ]
            }"#,
        )
        .unwrap();
        path
    }

    fn sample_config() -> PublishConfig {
        PublishConfig {
            owner: "acme".to_string(),
            project_number: 1,
            item_key: "repo:acme-api".to_string(),
        }
    }

    #[tokio::test]
    async fn test_publish_reuses_existing_item() {
        let tmp = TempDir::new().unwrap();
        let report = write_report(&tmp);
        let api = MockProjectsApi::new(Some("item-42"));

        let item_id = publish_report(&api, &sample_config(), &report, None)
            .await
            .unwrap();

        assert_eq!(item_id, "item-42");
        assert_eq!(api.calls(), vec!["find", "update:item-42"]);
    }

    #[tokio::test]
    async fn test_publish_creates_when_absent() {
        let tmp = TempDir::new().unwrap();
        let report = write_report(&tmp);
        let api = MockProjectsApi::new(None);

        let item_id = publish_report(&api, &sample_config(), &report, None)
            .await
            .unwrap();

        assert_eq!(item_id, "item-created");
        assert_eq!(api.calls(), vec!["find", "create", "update:item-created"]);
    }

    #[tokio::test]
    async fn test_publish_missing_report_errors() {
        let api = MockProjectsApi::new(None);
        let err = publish_report(
            &api,
            &sample_config(),
            Path::new("/no/such/report.json"),
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AuditError::FileRead { .. }));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_with_retry_recovers_from_transient_failures() {
        let attempts = AtomicU32::new(0);

        let result = with_retry(
            || {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(AuditError::GitHub("flaky".to_string()))
                    } else {
                        Ok(n)
                    }
                }
            },
            3,
            Duration::from_millis(1),
        )
        .await
        .unwrap();

        assert_eq!(result, 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_after_bound() {
        let attempts = AtomicU32::new(0);

        let err = with_retry(
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(AuditError::GitHub("always down".to_string())) }
            },
            2,
            Duration::from_millis(1),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AuditError::GitHub(_)));
        // One initial attempt plus two retries.
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_publish_summary_from_report() {
        let report: AuditReport = serde_json::from_str(
            r#"{
              "repo_root": "/repo",
              "summary": {"total": 3, "by_severity": {"High": 1, "Medium": 1, "Low": 1}},
              "findings": []
            }"#,
        )
        .unwrap();

        let summary = PublishSummary::from_report(&report);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.high, 1);
        assert!(summary.trend.is_none());
    }
}
