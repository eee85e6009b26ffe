use std::{
    cmp::Ordering,
    sync::{
        atomic::{AtomicI64, Ordering as AtomicOrdering},
        Mutex,
    },
};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{self, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{self, AddCode};

use super::{Entity, HasLastModified, Repository};

/// In-memory repository used by tests in place of MongoDB.
pub struct TestRepository<T> {
    _t: std::marker::PhantomData<T>,
    pub db: Mutex<Vec<Document>>,
    sequence: AtomicI64,
}

impl<T> TestRepository<T> {
    pub fn new() -> Self {
        Self {
            _t: std::marker::PhantomData,
            db: Mutex::new(Vec::new()),
            sequence: AtomicI64::new(0),
        }
    }
}

impl<T> Default for TestRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(db: &Mutex<T>) -> error::Result<std::sync::MutexGuard<'_, T>> {
    db.lock()
        .map_err(|_| anyhow!("Test repository lock poisoned").code(500))
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .filter(|(key, _)| !key.starts_with('$'))
        .all(|(key, value)| document.get(key) == Some(value))
}

fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(Bson::Int64(a)), Some(Bson::Int64(b))) => a.cmp(b),
        (Some(Bson::Int32(a)), Some(Bson::Int32(b))) => a.cmp(b),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (None | Some(Bson::Null), None | Some(Bson::Null)) => Ordering::Equal,
        (None | Some(Bson::Null), _) => Ordering::Less,
        (_, None | Some(Bson::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl<T> Repository<T> for TestRepository<T>
where
    T: Entity + HasLastModified + Clone + Send + Sync + Serialize + DeserializeOwned,
{
    async fn insert(&self, item: &T) -> error::Result<bool> {
        let mut db = lock(&self.db)?;

        let contains = db
            .iter()
            .any(|x| x.get_i64("id").ok() == Some(item.id()));
        if !contains {
            db.push(bson::to_document(item)?);
        }
        Ok(!contains)
    }

    async fn find(&self, field: &str, value: &Bson) -> error::Result<Option<T>> {
        let db = lock(&self.db)?;
        let found = db.iter().find(|x| x.get(field) == Some(value)).cloned();
        Ok(found.map(bson::from_document).transpose()?)
    }

    async fn delete(&self, field: &str, value: &Bson) -> error::Result<Option<T>> {
        let mut db = lock(&self.db)?;
        let Some(pos) = db.iter().position(|x| x.get(field) == Some(value)) else {
            return Ok(None);
        };
        Ok(Some(bson::from_document(db.remove(pos))?))
    }

    async fn update_one(&self, old: Document, update: &T) -> error::Result<T> {
        let mut db = lock(&self.db)?;

        let Some(stored) = db.iter_mut().find(|x| {
            matches(x, &old)
                && x.get_i64("last_modified").ok() == Some(update.last_modified())
        }) else {
            return Err(anyhow!("Failed to save changes").code(409));
        };

        let mut update = update.clone();
        update.set_last_modified(Utc::now().timestamp_micros());
        *stored = bson::to_document(&update)?;

        Ok(update)
    }

    async fn find_all(
        &self,
        skip: u64,
        limit: i64,
        sort: Option<Document>,
    ) -> error::Result<Vec<T>> {
        let mut documents = lock(&self.db)?.clone();

        if let Some(sort) = sort {
            documents.sort_by(|a, b| {
                sort.iter()
                    .map(|(field, direction)| {
                        let ordering = compare(a.get(field), b.get(field));
                        if direction.as_i32() == Some(-1) {
                            ordering.reverse()
                        } else {
                            ordering
                        }
                    })
                    .find(|ordering| ordering != &Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        documents
            .into_iter()
            .skip(skip as usize)
            .take(limit.max(0) as usize)
            .map(|x| -> error::Result<T> { Ok(bson::from_document(x)?) })
            .collect()
    }

    async fn count(&self) -> error::Result<u64> {
        Ok(lock(&self.db)?.len() as u64)
    }

    async fn next_id(&self) -> error::Result<i64> {
        Ok(self.sequence.fetch_add(1, AtomicOrdering::SeqCst) + 1)
    }
}
