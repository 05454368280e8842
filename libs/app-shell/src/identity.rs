use rand::Rng;
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use thiserror::Error;
use tracing::*;

/// Key the anonymous user identifier is persisted under.
pub const USER_ID_KEY: &str = "lol_data_user_id";

const UUID_TEMPLATE: &str = "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable")]
    Unavailable,
    #[error("Storage read failed: {0}")]
    Read(String),
    #[error("Storage write failed: {0}")]
    Write(String),
}

/// Durable string key-value storage, e.g. the browser's `localStorage`.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Storage for environments that have none, every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStorage;

impl KeyValueStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

pub fn generate_uuid() -> String {
    generate_uuid_with(&mut rand::thread_rng())
}

/// Fills the v4 template with random hex digits. Not suitable for secrets.
pub fn generate_uuid_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    UUID_TEMPLATE
        .chars()
        .map(|c| match c {
            'x' => hex_digit(rng.gen_range(0..16)),
            'y' => hex_digit((rng.gen_range(0..16) & 0x3) | 0x8),
            c => c,
        })
        .collect()
}

fn hex_digit(value: u8) -> char {
    HEX_DIGITS[(value & 0xf) as usize] as char
}

pub fn is_uuid_v4(value: &str) -> bool {
    value.len() == UUID_TEMPLATE.len()
        && value
            .chars()
            .zip(UUID_TEMPLATE.chars())
            .all(|(c, t)| match t {
                'x' => c.is_ascii_hexdigit(),
                'y' => matches!(c, '8' | '9' | 'a' | 'b' | 'A' | 'B'),
                t => c == t,
            })
}

/// Hands out the anonymous identifier for this browser profile.
///
/// When storage can't be used the identifier is kept in memory instead, so it
/// stays stable for as long as this service lives.
pub struct UserIdentifier<S> {
    storage: S,
    ephemeral: RefCell<Option<String>>,
}

impl<S: KeyValueStorage> UserIdentifier<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            ephemeral: RefCell::new(None),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn user_id(&self) -> String {
        let stored = self.storage.get(USER_ID_KEY);

        match &stored {
            Ok(Some(existing)) if !existing.is_empty() => {
                if !is_uuid_v4(existing) {
                    debug!(user_id = %existing, "stored user id is not a v4 uuid");
                }
                return existing.clone();
            }
            Ok(_) => {}
            Err(e) => warn!("user-id: reading: {}", e),
        }

        if let Some(id) = self.ephemeral.borrow().as_ref() {
            return id.clone();
        }

        let id = generate_uuid();

        if stored.is_ok() {
            match self.storage.set(USER_ID_KEY, &id) {
                Ok(()) => {
                    info!(user_id = %id, "generated new user id");
                    return id;
                }
                Err(e) => warn!("user-id: writing: {}", e),
            }
        }

        info!(user_id = %id, "using ephemeral user id");
        *self.ephemeral.borrow_mut() = Some(id.clone());

        id
    }

    /// True when the identifier survives a reload.
    pub fn is_persistent(&self) -> bool {
        matches!(self.storage.get(USER_ID_KEY), Ok(Some(id)) if !id.is_empty())
    }

    /// Forgets the identifier, the next `user_id` generates a fresh one.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.ephemeral.borrow_mut().take();
        self.storage.remove(USER_ID_KEY)
    }
}

#[cfg(test)]
mod tests;
