//! The document store seam.
//!
//! Handlers only need three operations: create-only insert, fetch by key,
//! and fetch everything under a prefix in key order. Keys come from
//! `helpdesk_core::keys`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::client;
use crate::error::StorageError;
use crate::objects;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store `body` under `key`. Fails with `AlreadyExists` if the key is taken.
    async fn insert_one(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError>;

    async fn find_one(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// All documents whose key starts with `prefix`, in key order.
    async fn find(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError>;
}

/// S3-backed store. The client is built on first use and shared for the
/// life of the process.
pub struct S3DocumentStore {
    bucket: String,
    client: OnceCell<Client>,
}

impl S3DocumentStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            client: OnceCell::new(),
        }
    }

    pub fn with_client(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            client: OnceCell::new_with(Some(client)),
        }
    }

    async fn client(&self) -> &Client {
        self.client.get_or_init(client::build_client).await
    }
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn insert_one(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let client = self.client().await;
        objects::put_object_if_none_match(client, &self.bucket, key, body, Some("application/json"))
            .await
    }

    async fn find_one(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let client = self.client().await;
        match objects::get_object(client, &self.bucket, key).await {
            Ok(body) => Ok(Some(body)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn find(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let client = self.client().await;
        let keys = objects::list_objects(client, &self.bucket, prefix).await?;

        let mut documents = Vec::with_capacity(keys.len());
        for key in &keys {
            match objects::get_object(client, &self.bucket, key).await {
                Ok(body) => documents.push(body),
                // Listed but gone by the time we fetched it.
                Err(StorageError::NotFound { key }) => debug!(%key, "skipping vanished object"),
                Err(e) => return Err(e),
            }
        }
        Ok(documents)
    }
}

/// Process-local store for development and tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let mut documents = self.documents.lock().await;
        if documents.contains_key(key) {
            return Err(StorageError::AlreadyExists {
                key: key.to_string(),
            });
        }
        documents.insert(key.to_string(), body);
        Ok(())
    }

    async fn find_one(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.documents.lock().await.get(key).cloned())
    }

    async fn find(&self, prefix: &str) -> Result<Vec<Vec<u8>>, StorageError> {
        let documents = self.documents.lock().await;
        Ok(documents
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(_, body)| body.clone())
            .collect())
    }
}
