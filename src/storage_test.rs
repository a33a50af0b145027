use super::*;

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gateway-session-{}", std::process::id()));
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_starts_empty() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    storage.set_item("token", "abc").unwrap();
    assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

    storage.remove_item("token").unwrap();
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn memory_storage_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    assert!(storage.remove_item("admin-token").is_ok());
}

#[test]
fn memory_storage_with_item_seeds_value() {
    let storage = MemoryStorage::with_item("admin-token", "seed");
    assert_eq!(storage.get_item("admin-token").as_deref(), Some("seed"));
    assert_eq!(storage.get_item("token"), None);
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_storage_missing_file_reads_empty() {
    let storage = FileStorage::new(scratch_path("missing.json"));
    assert_eq!(storage.get_item("token"), None);
}

#[test]
fn file_storage_keys_share_one_file() {
    let path = scratch_path("shared.json");
    let storage = FileStorage::new(&path);
    storage.set_item("admin-token", "admin-secret").unwrap();
    storage.set_item("token", "user-secret").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get_item("admin-token").as_deref(), Some("admin-secret"));
    assert_eq!(reopened.get_item("token").as_deref(), Some("user-secret"));

    reopened.remove_item("admin-token").unwrap();
    assert_eq!(storage.get_item("admin-token"), None);
    assert_eq!(storage.get_item("token").as_deref(), Some("user-secret"));
}

#[test]
fn file_storage_corrupt_file_reads_empty_and_rejects_writes() {
    let path = scratch_path("corrupt.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let storage = FileStorage::new(&path);
    assert_eq!(storage.get_item("token"), None);
    assert!(matches!(storage.set_item("token", "x"), Err(StorageError::Corrupt(_))));
}

#[test]
fn file_storage_creates_parent_directories() {
    let path = scratch_path("nested/deeper/state.json");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
    let storage = FileStorage::new(&path);
    storage.set_item("token", "abc").unwrap();
    assert!(path.exists());
    assert_eq!(storage.path(), path.as_path());
}
