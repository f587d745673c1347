//! Durable key-value persistence for the task list.
//!
//! In the browser this is `window.localStorage`; tests use [`MemoryStore`].

use std::collections::HashMap;

use log::warn;
use web_sys::Storage;

use crate::config::TASKS_STORAGE_KEY;
use crate::tasks::Task;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("stored tasks are malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(e.as_string().unwrap_or_else(|| "Storage error".to_string()))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, StorageError> {
    serde_json::to_string(tasks).map_err(StorageError::Serialize)
}

pub fn decode_tasks(json: &str) -> Result<Vec<Task>, StorageError> {
    serde_json::from_str(json).map_err(StorageError::Malformed)
}

/// Overwrite the persisted list.
pub fn save_tasks(store: &mut impl KeyValueStore, tasks: &[Task]) -> Result<(), StorageError> {
    let json = encode_tasks(tasks)?;
    store.set(TASKS_STORAGE_KEY, &json)
}

/// Read the persisted list. Missing, unreadable or malformed data all load as
/// an empty list.
pub fn load_tasks(store: &impl KeyValueStore) -> Vec<Task> {
    let json = match store.get(TASKS_STORAGE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("could not read saved tasks: {}", e);
            return Vec::new();
        }
    };
    decode_tasks(&json).unwrap_or_else(|e| {
        warn!("ignoring saved tasks: {}", e);
        Vec::new()
    })
}
