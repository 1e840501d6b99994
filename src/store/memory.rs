use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    field::{Field, FieldCell, FieldRecord},
    flower::{Flower, FlowerRecord},
};
use crate::store::{CatalogStore, StoreError, FIELDS, FLOWERS};

type Document = Map<String, Value>;
type Collection = RwLock<Vec<(String, Document)>>;

/// Document store kept in memory.
///
/// Documents are held as raw JSON, the way a hosted document database holds
/// them, and go through the typed schema on every read. Insertion order is
/// preserved.
#[derive(Default)]
pub struct MemoryStore {
    fields: Collection,
    flowers: Collection,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, name: &'static str) -> &Collection {
        if name == FIELDS {
            &self.fields
        } else {
            &self.flowers
        }
    }

    /// Stores a document exactly as given, bypassing the typed schema.
    pub async fn insert_raw(
        &self,
        collection: &'static str,
        id: impl Into<String>,
        body: Value,
    ) -> Result<(), StoreError> {
        let Value::Object(doc) = body else {
            return Err(StoreError::Backend("document body must be a JSON object".into()));
        };
        let id = id.into();
        let mut docs = self.collection(collection).write().await;
        match docs.iter().position(|(existing, _)| *existing == id) {
            Some(index) => docs[index].1 = doc,
            None => docs.push((id, doc)),
        }
        Ok(())
    }

    /// The stored JSON of a document, without its id.
    pub async fn raw(&self, collection: &'static str, id: &str) -> Option<Value> {
        let docs = self.collection(collection).read().await;
        docs.iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, doc)| Value::Object(doc.clone()))
    }

    async fn list<T: DeserializeOwned>(&self, collection: &'static str) -> Result<Vec<T>, StoreError> {
        let docs = self.collection(collection).read().await;
        docs.iter()
            .map(|(id, doc)| decode(collection, id, doc))
            .collect()
    }

    async fn get<T: DeserializeOwned>(&self, collection: &'static str, id: &str) -> Result<T, StoreError> {
        let docs = self.collection(collection).read().await;
        let (_, doc) = docs
            .iter()
            .find(|(existing, _)| existing == id)
            .ok_or_else(|| not_found(collection, id))?;
        decode(collection, id, doc)
    }

    async fn create<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &'static str,
        body: &B,
    ) -> Result<T, StoreError> {
        let doc = encode(body)?;
        let id = Uuid::new_v4().to_string();
        let created = decode(collection, &id, &doc)?;
        self.collection(collection).write().await.push((id, doc));
        Ok(created)
    }

    async fn replace<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let doc = encode(body)?;
        let mut docs = self.collection(collection).write().await;
        let (_, slot) = docs
            .iter_mut()
            .find(|(existing, _)| existing == id)
            .ok_or_else(|| not_found(collection, id))?;
        let replaced = decode(collection, id, &doc)?;
        *slot = doc;
        Ok(replaced)
    }

    async fn remove(&self, collection: &'static str, id: &str) -> Result<(), StoreError> {
        let mut docs = self.collection(collection).write().await;
        let before = docs.len();
        docs.retain(|(existing, _)| existing != id);
        if docs.len() == before {
            return Err(not_found(collection, id));
        }
        Ok(())
    }
}

fn not_found(collection: &'static str, id: &str) -> StoreError {
    StoreError::NotFound {
        collection,
        id: id.to_string(),
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Document, StoreError> {
    match serde_json::to_value(body)? {
        Value::Object(doc) => Ok(doc),
        _ => Err(StoreError::Backend("document body must be a JSON object".into())),
    }
}

fn decode<T: DeserializeOwned>(collection: &'static str, id: &str, doc: &Document) -> Result<T, StoreError> {
    let mut with_id = doc.clone();
    with_id.insert("id".into(), Value::String(id.to_string()));
    serde_json::from_value(Value::Object(with_id)).map_err(|source| StoreError::Decode {
        collection,
        id: id.to_string(),
        source,
    })
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_fields(&self) -> Result<Vec<Field>, StoreError> {
        self.list(FIELDS).await
    }

    async fn get_field(&self, id: &str) -> Result<Field, StoreError> {
        self.get(FIELDS, id).await
    }

    async fn create_field(&self, record: FieldRecord) -> Result<Field, StoreError> {
        self.create(FIELDS, &record).await
    }

    async fn delete_field(&self, id: &str) -> Result<(), StoreError> {
        self.remove(FIELDS, id).await
    }

    async fn update_field_grid(&self, id: &str, grid: Vec<FieldCell>) -> Result<(), StoreError> {
        let grid = serde_json::to_value(grid)?;
        let mut docs = self.fields.write().await;
        let (_, doc) = docs
            .iter_mut()
            .find(|(existing, _)| existing == id)
            .ok_or_else(|| not_found(FIELDS, id))?;
        doc.insert("grid".into(), grid);
        Ok(())
    }

    async fn list_flowers(&self) -> Result<Vec<Flower>, StoreError> {
        self.list(FLOWERS).await
    }

    async fn get_flower(&self, id: &str) -> Result<Flower, StoreError> {
        self.get(FLOWERS, id).await
    }

    async fn create_flower(&self, record: FlowerRecord) -> Result<Flower, StoreError> {
        self.create(FLOWERS, &record).await
    }

    async fn update_flower(&self, id: &str, record: FlowerRecord) -> Result<Flower, StoreError> {
        self.replace(FLOWERS, id, &record).await
    }

    async fn delete_flower(&self, id: &str) -> Result<(), StoreError> {
        self.remove(FLOWERS, id).await
    }
}
