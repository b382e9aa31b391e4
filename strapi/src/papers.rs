//! Papers data layer: read-through query cache plus write-then-refetch
//! mutations over the GraphQL API.
//!
//! DESIGN
//! ======
//! The server owns every paper; the cache only remembers recent reads, keyed
//! by the identifier used to fetch them. Writes never touch the cache
//! optimistically:
//!
//! - `create`/`delete` drop every cached list and refetch the default list
//!   before returning, so the next list read reflects the write.
//! - `update` drops the paper's detail entry and the lists, then reads the
//!   confirmed paper back.
//!
//! Reads use the bounded [`RetryPolicy`]; writes are attempted exactly once.
//! Every invalidation (`invalidate`, `invalidate_lists`, `clear`) bumps a
//! generation. A fetch records the generation it started under and its result
//! is only cached if no invalidation happened meanwhile, so a read that was in
//! flight across a write or a logout cannot put old data back.

#[cfg(test)]
#[path = "papers_test.rs"]
mod papers_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::json;

use crate::client::StrapiClient;
use crate::clock::Clock;
use crate::error::ApiError;
use crate::graphql::{self, GraphQlClient};
use crate::retry::RetryPolicy;
use crate::types::{Pagination, Paper, PaperDetail, PaperInput, PapersPage, User};

pub const PAPERS_STALE_AFTER: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    List(Option<Pagination>),
    Detail(String),
}

#[derive(Clone, Debug, PartialEq)]
enum Cached {
    List(PapersPage),
    Detail(PaperDetail),
}

#[derive(Debug)]
struct Entry {
    value: Cached,
    fetched_at: Duration,
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<QueryKey, Entry>,
    generation: u64,
}

pub struct PapersStore {
    gql: GraphQlClient,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
    stale_after: Duration,
    cache: Mutex<Entries>,
}

impl PapersStore {
    #[must_use]
    pub fn new(client: Arc<StrapiClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gql: GraphQlClient::new(client),
            clock,
            retry: RetryPolicy::default(),
            stale_after: PAPERS_STALE_AFTER,
            cache: Mutex::new(Entries::default()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// List papers, newest update first.
    ///
    /// # Errors
    ///
    /// Returns the last error after the retry policy gives up.
    pub async fn list(&self, pagination: Option<Pagination>) -> Result<PapersPage, ApiError> {
        let key = QueryKey::List(pagination);
        if let Some(Cached::List(page)) = self.fresh(&key) {
            return Ok(page);
        }
        self.retry.run("papers list", || self.fetch_list(pagination)).await
    }

    /// Fetch one paper with its author.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the server has no such paper.
    pub async fn get(&self, document_id: &str) -> Result<PaperDetail, ApiError> {
        let key = QueryKey::Detail(document_id.to_owned());
        if let Some(Cached::Detail(paper)) = self.fresh(&key) {
            return Ok(paper);
        }
        self.retry.run("paper detail", || self.fetch_detail(document_id)).await
    }

    /// Last cached list page, fresh or not.
    #[cfg(test)]
    pub(crate) fn cached_list(&self, pagination: Option<Pagination>) -> Option<PapersPage> {
        match self.entries().map.get(&QueryKey::List(pagination)) {
            Some(Entry { value: Cached::List(page), .. }) => Some(page.clone()),
            _ => None,
        }
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Create a paper and refresh the list before returning.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title, otherwise the server's
    /// rejection. Never retried.
    pub async fn create(&self, input: &PaperInput) -> Result<Paper, ApiError> {
        if input.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ApiError::Validation("Title is required".to_owned()));
        }
        let created: Option<Paper> = self
            .gql
            .execute(&graphql::CREATE_PAPER, json!({ "data": input }))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "paper creation failed"))?;
        let paper = created.ok_or_else(|| ApiError::Decode("createPaper returned no paper".to_owned()))?;
        tracing::info!(document_id = %paper.document_id, "paper created");
        self.refresh_lists().await;
        Ok(paper)
    }

    /// Apply a partial update and return the server-confirmed paper.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty change set, otherwise the
    /// server's rejection. Never retried.
    pub async fn update(&self, document_id: &str, input: &PaperInput) -> Result<PaperDetail, ApiError> {
        if input.is_empty() {
            return Err(ApiError::Validation("Nothing to update".to_owned()));
        }
        if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ApiError::Validation("Title is required".to_owned()));
        }
        let updated: Option<PaperDetail> = self
            .gql
            .execute(&graphql::UPDATE_PAPER, json!({ "documentId": document_id, "data": input }))
            .await
            .inspect_err(|err| tracing::error!(%document_id, error = %err, "paper update failed"))?;
        if updated.is_none() {
            return Err(ApiError::NotFound(format!("paper {document_id}")));
        }
        tracing::info!(%document_id, "paper updated");

        self.invalidate(&QueryKey::Detail(document_id.to_owned()));
        self.invalidate_lists();
        self.retry.run("paper detail", || self.fetch_detail(document_id)).await
    }

    /// Delete a paper and refresh the list before returning.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection. Never retried.
    pub async fn delete(&self, document_id: &str) -> Result<(), ApiError> {
        let deleted: Option<serde_json::Value> = self
            .gql
            .execute(&graphql::DELETE_PAPER, json!({ "documentId": document_id }))
            .await
            .inspect_err(|err| tracing::error!(%document_id, error = %err, "paper deletion failed"))?;
        if deleted.is_none() {
            return Err(ApiError::NotFound(format!("paper {document_id}")));
        }
        tracing::info!(%document_id, "paper deleted");

        self.invalidate(&QueryKey::Detail(document_id.to_owned()));
        self.refresh_lists().await;
        Ok(())
    }

    // =========================================================================
    // CACHE
    // =========================================================================

    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.entries();
        entries.map.remove(key);
        entries.generation += 1;
    }

    pub fn invalidate_lists(&self) {
        let mut entries = self.entries();
        entries.map.retain(|key, _| !matches!(key, QueryKey::List(_)));
        entries.generation += 1;
    }

    /// Forget everything, including results of fetches still in flight.
    pub fn clear(&self) {
        let mut entries = self.entries();
        entries.map.clear();
        entries.generation += 1;
    }

    fn fresh(&self, key: &QueryKey) -> Option<Cached> {
        let now = self.clock.now();
        let entries = self.entries();
        let entry = entries.map.get(key)?;
        (now.saturating_sub(entry.fetched_at) < self.stale_after).then(|| entry.value.clone())
    }

    fn generation(&self) -> u64 {
        self.entries().generation
    }

    fn store(&self, key: QueryKey, value: Cached, generation: u64) {
        let fetched_at = self.clock.now();
        let mut entries = self.entries();
        if entries.generation == generation {
            entries.map.insert(key, Entry { value, fetched_at });
        } else {
            tracing::debug!(?key, "discarding response fetched before an invalidation");
        }
    }

    async fn refresh_lists(&self) {
        self.invalidate_lists();
        if let Err(err) = self.fetch_list(None).await {
            tracing::warn!(error = %err, "list refetch after write failed; next read will retry");
        }
    }

    async fn fetch_list(&self, pagination: Option<Pagination>) -> Result<PapersPage, ApiError> {
        let generation = self.generation();
        let variables = match pagination {
            Some(p) => json!({ "pagination": { "page": p.page, "pageSize": p.page_size } }),
            None => json!({}),
        };
        let page: PapersPage = self.gql.execute(&graphql::PAPERS, variables).await?.unwrap_or_default();
        self.store(QueryKey::List(pagination), Cached::List(page.clone()), generation);
        Ok(page)
    }

    async fn fetch_detail(&self, document_id: &str) -> Result<PaperDetail, ApiError> {
        let generation = self.generation();
        let paper: PaperDetail = self
            .gql
            .execute(&graphql::PAPER, json!({ "documentId": document_id }))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("paper {document_id}")))?;
        self.store(QueryKey::Detail(document_id.to_owned()), Cached::Detail(paper.clone()), generation);
        Ok(paper)
    }
}

/// Whether `user` wrote `paper`. Edit controls are derived from this; the
/// server still decides.
#[must_use]
pub fn is_author(paper: &PaperDetail, user: Option<&User>) -> bool {
    match (paper.author_name(), user) {
        (Some(author), Some(user)) => author == user.username,
        _ => false,
    }
}
