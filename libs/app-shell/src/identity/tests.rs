use rand::{rngs::StdRng, SeedableRng};

use super::*;

/// Readable but full, as when the quota is exceeded.
#[derive(Default)]
struct FullStorage;

impl KeyValueStorage for FullStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write("QuotaExceededError".to_owned()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fn assert_v4_layout(id: &str) {
    assert_eq!(id.len(), 36, "{}", id);
    for (i, c) in id.chars().enumerate() {
        match i + 1 {
            9 | 14 | 19 | 24 => assert_eq!(c, '-', "{}", id),
            15 => assert_eq!(c, '4', "{}", id),
            20 => assert!(matches!(c, '8' | '9' | 'a' | 'b'), "{}", id),
            _ => assert!(matches!(c, '0'..='9' | 'a'..='f'), "{}", id),
        }
    }
}

#[test]
fn it_generates_v4_layout() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let id = generate_uuid_with(&mut rng);
        assert_v4_layout(&id);
        assert!(is_uuid_v4(&id));
    }

    assert_v4_layout(&generate_uuid());
}

#[test]
fn it_generates_distinct_ids() {
    let mut rng = StdRng::seed_from_u64(42);

    assert_ne!(generate_uuid_with(&mut rng), generate_uuid_with(&mut rng));
}

#[test]
fn it_recognizes_v4_layout() {
    assert!(is_uuid_v4("3f2b8c1e-9d4a-4b7e-a1c2-0e5f6d7c8b9a"));
    assert!(!is_uuid_v4("3f2b8c1e-9d4a-1b7e-a1c2-0e5f6d7c8b9a"));
    assert!(!is_uuid_v4("3f2b8c1e-9d4a-4b7e-c1c2-0e5f6d7c8b9a"));
    assert!(!is_uuid_v4("3f2b8c1e9d4a4b7ea1c20e5f6d7c8b9a"));
    assert!(!is_uuid_v4(""));
}

#[test]
fn it_returns_the_same_id_twice() {
    let identifier = UserIdentifier::new(MemoryStorage::default());

    let first = identifier.user_id();
    let second = identifier.user_id();

    assert_eq!(first, second);
    assert!(is_uuid_v4(&first));
    assert!(identifier.is_persistent());
    assert_eq!(identifier.storage().get(USER_ID_KEY), Ok(Some(first)));
}

#[test]
fn it_keeps_an_existing_id_unchanged() {
    let storage = MemoryStorage::default();
    storage.set(USER_ID_KEY, "legacy-visitor").unwrap();

    let identifier = UserIdentifier::new(storage);

    assert_eq!(identifier.user_id(), "legacy-visitor");
}

#[test]
fn it_regenerates_after_the_key_is_cleared_externally() {
    let storage = Rc::new(MemoryStorage::default());
    let identifier = UserIdentifier::new(storage.clone());

    let before = identifier.user_id();
    storage.remove(USER_ID_KEY).unwrap();
    let after = identifier.user_id();

    assert_ne!(before, after);
    assert_eq!(storage.get(USER_ID_KEY), Ok(Some(after)));
}

#[test]
fn it_treats_an_empty_value_as_absent() {
    let storage = MemoryStorage::default();
    storage.set(USER_ID_KEY, "").unwrap();

    let identifier = UserIdentifier::new(storage);
    let id = identifier.user_id();

    assert!(is_uuid_v4(&id));
    assert_eq!(identifier.storage().get(USER_ID_KEY), Ok(Some(id)));
}

#[test]
fn it_resets() {
    let identifier = UserIdentifier::new(MemoryStorage::default());

    let before = identifier.user_id();
    identifier.reset().unwrap();

    assert!(!identifier.is_persistent());
    assert_ne!(identifier.user_id(), before);
}

#[test]
fn it_falls_back_to_an_ephemeral_id_without_storage() {
    let identifier = UserIdentifier::new(UnavailableStorage);

    let first = identifier.user_id();

    assert!(is_uuid_v4(&first));
    assert_eq!(identifier.user_id(), first);
    assert!(!identifier.is_persistent());
    assert_eq!(identifier.reset(), Err(StorageError::Unavailable));
    assert_ne!(identifier.user_id(), first);
}

#[test]
fn it_falls_back_to_an_ephemeral_id_when_writes_fail() {
    let identifier = UserIdentifier::new(FullStorage);

    let first = identifier.user_id();

    assert_eq!(identifier.user_id(), first);
    assert!(!identifier.is_persistent());
}
