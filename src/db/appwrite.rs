// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Appwrite document store wrapper.
//!
//! Thin pagination + upsert layer over the Appwrite Databases REST API.
//! Every write path in the sync engine depends on the upsert contract:
//! attempt update first; only create if the update fails with not-found;
//! any other update failure aborts that single record, not the batch.

use crate::config::Config;
use crate::error::AppError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of an upsert, as a typed result rather than a parsed status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated,
    Created,
}

/// Connection details for one Appwrite project.
struct Target {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
}

/// Appwrite database client.
#[derive(Clone)]
pub struct AppwriteDb {
    // None in offline/mock mode: every call returns a Database error.
    target: Option<Arc<Target>>,
}

/// Envelope Appwrite wraps document listings in.
#[derive(Deserialize)]
struct ListResponse<T> {
    #[allow(dead_code)]
    total: u64,
    documents: Vec<T>,
}

impl AppwriteDb {
    /// Create a new Appwrite client from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            target: Some(Arc::new(Target {
                http: reqwest::Client::new(),
                endpoint: config.appwrite_endpoint.clone(),
                project_id: config.appwrite_project_id.clone(),
                api_key: config.appwrite_api_key.clone(),
                database_id: config.database_id.clone(),
            })),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { target: None }
    }

    /// Helper to get the connection or return an error if offline.
    fn target(&self) -> Result<&Target, AppError> {
        self.target
            .as_deref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn document_url(&self, target: &Target, collection: &str, doc_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents/{}",
            target.endpoint, target.database_id, collection, doc_id
        )
    }

    fn collection_url(&self, target: &Target, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            target.endpoint, target.database_id, collection
        )
    }

    fn apply_headers(&self, target: &Target, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-Appwrite-Project", &target.project_id)
            .header("X-Appwrite-Key", &target.api_key)
            .header("Content-Type", "application/json")
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Get a single document by ID. Returns `None` if it does not exist.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<T>, AppError> {
        let target = self.target()?;
        let url = self.document_url(target, collection, doc_id);

        let response = self
            .apply_headers(target, target.http.get(&url))
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Database(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map(Some)
            .map_err(|e| AppError::Database(format!("JSON parse error: {}", e)))
    }

    /// List documents in a collection with offset/limit pagination.
    pub async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<T>, AppError> {
        let target = self.target()?;
        let url = self.collection_url(target, collection);

        let response = self
            .apply_headers(target, target.http.get(&url))
            .query(&[
                ("queries[]", format!("limit({})", limit)),
                ("queries[]", format!("offset({})", offset)),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Database(format!("HTTP {}: {}", status, body)));
        }

        let list: ListResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Database(format!("JSON parse error: {}", e)))?;

        Ok(list.documents)
    }

    /// List an entire collection, paging until exhausted.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        collection: &str,
        page_size: u32,
    ) -> Result<Vec<T>, AppError> {
        let mut all = Vec::new();
        let mut offset = 0u32;

        loop {
            let page: Vec<T> = self.list_documents(collection, page_size, offset).await?;
            let fetched = page.len() as u32;
            all.extend(page);

            if fetched < page_size {
                break;
            }
            offset += page_size;
        }

        Ok(all)
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Update an existing document in place.
    ///
    /// A missing document is a typed `NotFound`, which the live-sync path
    /// counts as an error without creating, and the upsert path turns into a
    /// create.
    pub async fn update_document<T: Serialize>(
        &self,
        collection: &str,
        doc_id: &str,
        data: &T,
    ) -> Result<(), AppError> {
        let target = self.target()?;
        let url = self.document_url(target, collection, doc_id);
        let body = serde_json::json!({ "data": data });

        let response = self
            .apply_headers(target, target.http.patch(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Document {}/{}",
                collection, doc_id
            )));
        }
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Database(format!("HTTP {}: {}", status, text)));
        }

        Ok(())
    }

    /// Create a document with an explicit ID.
    pub async fn create_document<T: Serialize>(
        &self,
        collection: &str,
        doc_id: &str,
        data: &T,
    ) -> Result<(), AppError> {
        let target = self.target()?;
        let url = self.collection_url(target, collection);
        let body = serde_json::json!({ "documentId": doc_id, "data": data });

        let response = self
            .apply_headers(target, target.http.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Database(format!("HTTP {}: {}", status, text)));
        }

        Ok(())
    }

    /// Update-then-create-on-not-found upsert.
    ///
    /// Not a transaction: two concurrent upserts of the same ID can race, but
    /// deterministic document IDs mean both converge on the same document.
    pub async fn upsert_document<T: Serialize>(
        &self,
        collection: &str,
        doc_id: &str,
        data: &T,
    ) -> Result<UpsertOutcome, AppError> {
        match self.update_document(collection, doc_id, data).await {
            Ok(()) => Ok(UpsertOutcome::Updated),
            Err(AppError::NotFound(_)) => {
                self.create_document(collection, doc_id, data).await?;
                Ok(UpsertOutcome::Created)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_db_is_offline() {
        let db = AppwriteDb::new_mock();
        let result = db
            .get_document::<serde_json::Value>("fixtures", "match_1")
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
