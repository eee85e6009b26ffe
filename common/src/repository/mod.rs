pub mod mongo_repository;
pub mod test_repository;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error;

pub trait Entity {
    fn id(&self) -> i64;
}

pub trait HasLastModified {
    fn last_modified(&self) -> i64;
    fn set_last_modified(&mut self, value: i64);
}

#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn insert(&self, item: &T) -> error::Result<bool>;
    async fn find(&self, field: &str, value: &Bson) -> error::Result<Option<T>>;
    async fn delete(&self, field: &str, value: &Bson) -> error::Result<Option<T>>;
    /// Replaces the document matched by `old` if nobody changed it since
    /// `update` was read. Returns the stored version.
    async fn update_one(&self, old: Document, update: &T) -> error::Result<T>;
    async fn find_all(&self, skip: u64, limit: i64, sort: Option<Document>)
        -> error::Result<Vec<T>>;
    async fn count(&self) -> error::Result<u64>;
    async fn next_id(&self) -> error::Result<i64>;
}

pub type RepositoryObject<T> = Arc<dyn Repository<T>>;
