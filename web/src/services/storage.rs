use wasm_bindgen::JsValue;

use app_shell::{KeyValueStorage, StorageError};

/// `window.localStorage`, when the browser allows it.
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("storage: localStorage unavailable");
        }
        Self { storage }
    }

    fn raw(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.raw()?
            .get_item(key)
            .map_err(|e| StorageError::Read(describe(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.raw()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(describe(e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.raw()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(describe(e)))
    }
}
