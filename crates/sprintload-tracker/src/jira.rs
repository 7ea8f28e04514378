//! Jira Agile REST client.
//!
//! Sprint contents come from `GET {base}/rest/agile/1.0/sprint/{id}/issue`
//! with the changelog expanded. The endpoint is paged with
//! `startAt`/`maxResults`; pages are requested until `startAt` reaches
//! `total` or a page comes back empty.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as Base64};
use serde::Deserialize;
use sprintload_core::enums::{ItemStatus, ItemType};
use sprintload_core::{ChangeEvent, FieldChange, Item};
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::source::IssueSource;

/// Fields requested for every issue.
const ISSUE_FIELDS: &str = "summary,status,assignee,issuetype,labels";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Basic-auth credentials. The token is read from the environment and never
/// persisted.
#[derive(Clone)]
pub struct JiraAuth {
    email: String,
    token: String,
}

impl JiraAuth {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Reads the token from `token_env`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MissingToken`] if the variable is unset or blank.
    pub fn from_env(email: impl Into<String>, token_env: &str) -> Result<Self> {
        match std::env::var(token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(email, token.trim())),
            _ => Err(TrackerError::MissingToken {
                env: token_env.to_string(),
            }),
        }
    }

    /// The `Authorization` header value.
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.email, self.token);
        format!("Basic {}", Base64.encode(raw))
    }
}

impl std::fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraAuth")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Blocking Jira client for one site.
#[derive(Debug)]
pub struct JiraSource {
    base_url: String,
    auth: Option<JiraAuth>,
    page_size: u32,
    agent: ureq::Agent,
}

impl JiraSource {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotConfigured`] if `base_url` is blank.
    pub fn new(base_url: &str, auth: Option<JiraAuth>, page_size: u32) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(TrackerError::NotConfigured);
        }

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();

        Ok(Self {
            base_url: base_url.to_string(),
            auth,
            page_size: page_size.max(1),
            agent: ureq::Agent::new_with_config(config),
        })
    }

    /// The sprint issue endpoint.
    pub fn sprint_url(&self, sprint: &str) -> String {
        format!("{}/rest/agile/1.0/sprint/{}/issue", self.base_url, sprint.trim())
    }

    fn fetch_page(&self, url: &str, start_at: usize) -> Result<SprintIssuePage> {
        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .query("expand", "changelog")
            .query("fields", ISSUE_FIELDS)
            .query("startAt", start_at.to_string())
            .query("maxResults", self.page_size.to_string());
        if let Some(auth) = &self.auth {
            request = request.header("Authorization", auth.header_value());
        }

        let mut response = request
            .call()
            .map_err(|e| TrackerError::from_ureq(url, e))?;
        response
            .body_mut()
            .read_json::<SprintIssuePage>()
            .map_err(|source| TrackerError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

impl IssueSource for JiraSource {
    fn sprint_items(&self, sprint: &str) -> Result<Vec<Item>> {
        let url = self.sprint_url(sprint);
        let mut items = Vec::new();
        let mut start_at = 0usize;

        loop {
            let page = self.fetch_page(&url, start_at)?;
            let fetched = page.issues.len();
            debug!(sprint, start_at, fetched, total = page.total, "fetched issue page");

            items.extend(page.issues.into_iter().map(Item::from));
            match next_start(start_at, fetched, page.total) {
                Some(next) => start_at = next,
                None => break,
            }
        }

        Ok(items)
    }
}

/// Offset of the page after one that returned `fetched` issues from
/// `start_at`, or `None` once `total` is reached or a page comes back empty.
fn next_start(start_at: usize, fetched: usize, total: usize) -> Option<usize> {
    let next = start_at + fetched;
    (fetched > 0 && next < total).then_some(next)
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SprintIssuePage {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: String,
    #[serde(default)]
    fields: JiraFields,
    #[serde(default)]
    changelog: JiraChangelog,
}

#[derive(Debug, Default, Deserialize)]
struct JiraFields {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    status: Option<Named>,
    #[serde(default)]
    assignee: Option<Person>,
    #[serde(default)]
    issuetype: Option<Named>,
    #[serde(default)]
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct JiraChangelog {
    #[serde(default)]
    histories: Vec<History>,
}

#[derive(Debug, Deserialize)]
struct History {
    created: String,
    #[serde(default)]
    items: Vec<HistoryItem>,
}

#[derive(Debug, Deserialize)]
struct HistoryItem {
    field: String,
    #[serde(default, rename = "fromString")]
    from_value: Option<String>,
    #[serde(default, rename = "toString")]
    to_value: Option<String>,
}

impl From<JiraIssue> for Item {
    fn from(issue: JiraIssue) -> Self {
        let JiraIssue {
            key,
            fields,
            changelog,
        } = issue;

        Item {
            key,
            title: fields.summary.unwrap_or_default(),
            assignee: fields.assignee.map(|p| p.display_name).unwrap_or_default(),
            status: fields
                .status
                .map(|s| ItemStatus::from(s.name))
                .unwrap_or_default(),
            item_type: fields
                .issuetype
                .map(|t| ItemType::from(t.name))
                .unwrap_or_default(),
            labels: fields.labels,
            changelog: changelog
                .histories
                .into_iter()
                .map(|h| {
                    ChangeEvent::new(
                        h.created,
                        h.items
                            .into_iter()
                            .map(|c| FieldChange {
                                field: c.field,
                                from: c.from_value,
                                to: c.to_value,
                            })
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}
