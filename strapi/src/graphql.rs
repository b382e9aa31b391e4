//! GraphQL documents and envelope handling for the papers schema.
//!
//! ERROR POLICY
//! ============
//! Errors are always logged. When the server also returned the requested
//! field, the data wins (partial results are shown); otherwise the errors
//! become the call's failure. A `FORBIDDEN` code maps to
//! [`ApiError::Forbidden`] so unauthorized writes are reported, not swallowed.

#[cfg(test)]
#[path = "graphql_test.rs"]
mod graphql_test;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::client::StrapiClient;
use crate::error::ApiError;
use crate::transport::HttpRequest;

/// A named GraphQL operation and the top-level field it selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub field: &'static str,
    pub document: &'static str,
}

pub const PAPERS: Operation = Operation {
    name: "Papers_connection",
    field: "papers_connection",
    document: r#"query Papers_connection($pagination: PaginationArg) {
  papers_connection(pagination: $pagination, sort: ["updatedAt:desc"]) {
    nodes {
      content
      createdAt
      documentId
      publishedAt
      title
      updatedAt
    }
    pageInfo {
      page
      pageCount
      pageSize
      total
    }
  }
}"#,
};

pub const PAPER: Operation = Operation {
    name: "Paper",
    field: "paper",
    document: r"query Paper($documentId: ID!) {
  paper(documentId: $documentId) {
    author {
      username
    }
    content
    createdAt
    documentId
    publishedAt
    title
    updatedAt
  }
}",
};

pub const CREATE_PAPER: Operation = Operation {
    name: "CreatePaper",
    field: "createPaper",
    document: r"mutation CreatePaper($data: PaperInput!) {
  createPaper(data: $data) {
    documentId
    title
    content
    createdAt
    updatedAt
    publishedAt
  }
}",
};

pub const UPDATE_PAPER: Operation = Operation {
    name: "UpdatePaper",
    field: "updatePaper",
    document: r"mutation UpdatePaper($documentId: ID!, $data: PaperInput!) {
  updatePaper(documentId: $documentId, data: $data) {
    documentId
    title
    content
    publishedAt
    createdAt
    updatedAt
    author {
      username
    }
  }
}",
};

pub const DELETE_PAPER: Operation = Operation {
    name: "DeletePaper",
    field: "deletePaper",
    document: r"mutation DeletePaper($documentId: ID!) {
  deletePaper(documentId: $documentId) {
    documentId
  }
}",
};

// =============================================================================
// ENVELOPE
// =============================================================================

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<Extensions>,
}

#[derive(Debug, Deserialize)]
struct Extensions {
    #[serde(default)]
    code: Option<String>,
}

/// Build the POST body for an operation.
#[must_use]
pub fn request_body(operation: &Operation, variables: Value) -> Value {
    json!({
        "operationName": operation.name,
        "query": operation.document,
        "variables": variables,
    })
}

/// Interpret a GraphQL response body and return the operation's field.
///
/// `Ok(None)` means the field came back `null` without errors.
///
/// # Errors
///
/// Returns a decode error for malformed bodies, or the reported errors when no
/// data accompanied them.
pub fn extract<T: DeserializeOwned>(operation: &Operation, body: &str) -> Result<Option<T>, ApiError> {
    let envelope: Envelope = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    for err in &envelope.errors {
        tracing::error!(operation = operation.name, message = %err.message, "graphql error");
    }

    let field = envelope
        .data
        .as_ref()
        .and_then(|data| data.get(operation.field))
        .filter(|value| !value.is_null())
        .cloned();

    match field {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string())),
        None if envelope.errors.is_empty() => Ok(None),
        None => Err(classify(envelope.errors)),
    }
}

fn classify(errors: Vec<GraphQlError>) -> ApiError {
    let forbidden = errors.iter().find(|e| {
        e.extensions
            .as_ref()
            .and_then(|x| x.code.as_deref())
            .is_some_and(|code| code == "FORBIDDEN")
    });
    if let Some(err) = forbidden {
        return ApiError::Forbidden { message: err.message.clone() };
    }
    ApiError::GraphQl(errors.into_iter().map(|e| e.message).collect())
}

// =============================================================================
// CLIENT
// =============================================================================

/// Executes operations against the configured GraphQL endpoint through the
/// shared authenticated pipeline.
#[derive(Clone)]
pub struct GraphQlClient {
    client: Arc<StrapiClient>,
}

impl GraphQlClient {
    #[must_use]
    pub fn new(client: Arc<StrapiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns the transport/status error or the GraphQL errors.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: Value,
    ) -> Result<Option<T>, ApiError> {
        let url = self.client.config().graphql_url.clone();
        let request = HttpRequest::post(url, request_body(operation, variables));
        let response = self.client.execute(request).await?;
        extract(operation, &response.body)
    }
}
