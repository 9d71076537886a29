use serde::{Deserialize, Serialize};

/// Request body for the REST issue-creation endpoint.
#[derive(Debug, Serialize)]
pub struct IssuePayload<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub labels: &'a [String],
    pub assignees: &'a [String],
}

/// The two fields of a created issue this tool cares about: the opaque node
/// id used for project linkage, and the browsable URL.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub node_id: String,
    pub html_url: String,
}
