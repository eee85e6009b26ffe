use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use mongodb::{
    bson::{doc, to_document, Bson, Document},
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{self, AddCode};

use super::{Entity, HasLastModified, Repository};

pub struct MongoRepository<T> {
    pub collection: mongodb::Collection<T>,
    counters: mongodb::Collection<Document>,
    name: String,
}

impl<T> MongoRepository<T> {
    pub async fn new(mongo_uri: &str, database: &str, collection: &str) -> error::Result<Self> {
        let database = mongodb::Client::with_uri_str(mongo_uri)
            .await?
            .database(database);
        Ok(Self {
            collection: database.collection(collection),
            counters: database.collection("counters"),
            name: collection.to_string(),
        })
    }
}

#[async_trait]
impl<T> Repository<T> for MongoRepository<T>
where
    T: Entity + Serialize + DeserializeOwned + Unpin + Clone + Send + Sync + HasLastModified,
{
    async fn insert(&self, item: &T) -> error::Result<bool> {
        let result = self
            .collection
            .find_one(doc! {"id": item.id()}, None)
            .await?
            .is_none();

        if result {
            self.collection.insert_one(item, None).await?;
        }
        Ok(result)
    }

    async fn find(&self, field: &str, value: &Bson) -> error::Result<Option<T>> {
        let result = self.collection.find_one(doc! {field: value}, None).await?;
        Ok(result)
    }

    async fn delete(&self, field: &str, value: &Bson) -> error::Result<Option<T>> {
        let result = self
            .collection
            .find_one_and_delete(doc! {field: value}, None)
            .await?;
        Ok(result)
    }

    async fn update_one(&self, mut old: Document, update: &T) -> error::Result<T> {
        old.extend(doc! {
            "$or": [
                { "last_modified": Bson::Int64(update.last_modified()) },
                { "last_modified": { "$exists": false } }
            ]
        });

        let mut update = update.clone();
        update.set_last_modified(Utc::now().timestamp_micros());

        let result = self
            .collection
            .find_one_and_update(old, doc! {"$set": to_document(&update)?}, None)
            .await?
            .is_some();

        if !result {
            return Err(anyhow!("Failed to save changes").code(409));
        }

        Ok(update)
    }

    async fn find_all(
        &self,
        skip: u64,
        limit: i64,
        sort: Option<Document>,
    ) -> error::Result<Vec<T>> {
        let find_options = FindOptions::builder()
            .skip(skip)
            .limit(limit)
            .sort(sort)
            .build();

        let results: Vec<mongodb::error::Result<T>> = self
            .collection
            .find(None, find_options)
            .await?
            .collect()
            .await;

        Ok(results.into_iter().collect::<mongodb::error::Result<_>>()?)
    }

    async fn count(&self) -> error::Result<u64> {
        Ok(self.collection.count_documents(None, None).await?)
    }

    async fn next_id(&self) -> error::Result<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                doc! {"_id": self.name.as_str()},
                doc! {"$inc": {"seq": Bson::Int64(1)}},
                options,
            )
            .await?
            .ok_or(anyhow!("Sequence for {} was not created", self.name).code(500))?;

        Ok(counter.get_i64("seq")?)
    }
}
