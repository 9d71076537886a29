use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{ImportError, Result};
use crate::github::issue::{CreatedIssue, IssuePayload};
use crate::note::Note;

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const HTTP_TIMEOUT_SECS: u64 = 30;

const ORG_ID_QUERY: &str = r#"
query($login: String!) {
  organization(login: $login) {
    id
  }
}
"#;

const PROJECT_ID_QUERY: &str = r#"
query($login: String!, $number: Int!) {
  organization(login: $login) {
    projectV2(number: $number) {
      id
    }
  }
}
"#;

const ADD_TO_PROJECT_MUTATION: &str = r#"
mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: {
    projectId: $projectId,
    contentId: $contentId
  }) {
    item {
      id
    }
  }
}
"#;

pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    org: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| ImportError::Request(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            token: config.github_token.clone(),
            org: config.org.clone(),
            repo: config.repo.clone(),
        })
    }

    pub async fn resolve_organization(&self, login: &str) -> Result<String> {
        let data = self.graphql(ORG_ID_QUERY, json!({ "login": login })).await?;

        org_id(&data).ok_or_else(|| ImportError::NotFound(format!("organization {login}")))
    }

    pub async fn resolve_project(&self, login: &str, number: u32) -> Result<String> {
        let data = self
            .graphql(PROJECT_ID_QUERY, json!({ "login": login, "number": number }))
            .await?;

        project_id(&data).ok_or_else(|| {
            ImportError::NotFound(format!("project {number} in organization {login}"))
        })
    }

    pub async fn create_issue(&self, note: &Note) -> Result<CreatedIssue> {
        let url = format!("{GITHUB_API_URL}/repos/{}/{}/issues", self.org, self.repo);
        let payload = IssuePayload {
            title: &note.title,
            body: &note.body,
            labels: &note.labels,
            assignees: &note.assignees,
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::CREATED {
            error!("failed to create issue: {}", note.title);
            return Err(ImportError::Creation {
                status: status.as_u16(),
                body,
            });
        }

        info!("created issue: {}", note.title);
        let issue: CreatedIssue = serde_json::from_str(&body)?;
        Ok(issue)
    }

    pub async fn add_to_project(&self, project_id: &str, issue_node_id: &str) -> Result<String> {
        let data = self
            .graphql(
                ADD_TO_PROJECT_MUTATION,
                json!({ "projectId": project_id, "contentId": issue_node_id }),
            )
            .await?;

        item_id(&data)
            .ok_or_else(|| ImportError::Request("no item id in addProjectV2ItemById response".into()))
    }

    async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let response = self
            .http
            .post(GITHUB_GRAPHQL_URL)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            error!("graphql http error: {status}");
            error!("{body}");
            return Err(ImportError::Request(format!(
                "graphql request failed with status {status}"
            )));
        }

        graphql_data(&body)
    }
}

/// Parses a 200 GraphQL response body: a top-level `errors` array is a
/// request failure (each message logged), otherwise the `data` payload is
/// returned.
fn graphql_data(body: &str) -> Result<Value> {
    let mut result: Value = serde_json::from_str(body)?;

    if let Some(errors) = result.get("errors").and_then(Value::as_array) {
        error!("graphql returned errors:");
        for err in errors {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            error!(" - {message}");
        }
        return Err(ImportError::Request("graphql returned errors".into()));
    }

    Ok(result
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

fn org_id(data: &Value) -> Option<String> {
    data["organization"]["id"].as_str().map(str::to_string)
}

fn project_id(data: &Value) -> Option<String> {
    data["organization"]["projectV2"]["id"]
        .as_str()
        .map(str::to_string)
}

fn item_id(data: &Value) -> Option<String> {
    data["addProjectV2ItemById"]["item"]["id"]
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_data_returns_the_data_payload() {
        let data = graphql_data(r#"{"data": {"organization": {"id": "O_abc"}}}"#).unwrap();
        assert_eq!(org_id(&data), Some("O_abc".to_string()));
    }

    #[test]
    fn graphql_data_treats_errors_array_as_request_failure() {
        let body = r#"{
            "data": null,
            "errors": [
                {"message": "Could not resolve to an Organization"},
                {"message": "rate limited"}
            ]
        }"#;
        assert!(matches!(
            graphql_data(body),
            Err(ImportError::Request(_))
        ));
    }

    #[test]
    fn graphql_data_rejects_malformed_bodies() {
        assert!(matches!(graphql_data("<html>"), Err(ImportError::Json(_))));
    }

    #[test]
    fn org_id_is_absent_when_organization_is_null() {
        let data = graphql_data(r#"{"data": {"organization": null}}"#).unwrap();
        assert_eq!(org_id(&data), None);
    }

    #[test]
    fn project_id_is_absent_when_project_is_null() {
        let body = r#"{"data": {"organization": {"projectV2": null}}}"#;
        let data = graphql_data(body).unwrap();
        assert_eq!(project_id(&data), None);

        let data = graphql_data(r#"{"data": {"organization": null}}"#).unwrap();
        assert_eq!(project_id(&data), None);
    }

    #[test]
    fn item_id_comes_from_the_nested_mutation_payload() {
        let body = r#"{"data": {"addProjectV2ItemById": {"item": {"id": "PVTI_xyz"}}}}"#;
        let data = graphql_data(body).unwrap();
        assert_eq!(item_id(&data), Some("PVTI_xyz".to_string()));

        let data = graphql_data(r#"{"data": {"addProjectV2ItemById": null}}"#).unwrap();
        assert_eq!(item_id(&data), None);
    }
}
