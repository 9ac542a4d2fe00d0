use libris::error::LibrisError;
use libris::model::{BookInput, BookPatch, BookStatus};
use libris::store::fs::FsBlobStore;
use libris::store::{BlobStore, BookStore, DEFAULT_BLOB_KEY};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, BookStore<FsBlobStore>) {
    let dir = TempDir::new().unwrap();
    let store = BookStore::new(FsBlobStore::new(dir.path()));
    (dir, store)
}

fn input(title: &str, status: BookStatus) -> BookInput {
    BookInput::new(title, "Italo Calvino", "Narrativa", "covers/calvino.jpg", status)
}

#[test]
fn test_collection_survives_reopen() {
    let (dir, mut store) = setup();
    let first = store.add(input("Il barone rampante", BookStatus::ToRead)).unwrap();
    let second = store.add(input("Le città invisibili", BookStatus::Reading)).unwrap();
    store
        .update(&first.id, &BookPatch::new().rating(Some(5)).status(BookStatus::Finished))
        .unwrap();

    let mut reopened = BookStore::new(FsBlobStore::new(dir.path()));
    let books = reopened.load().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].id, second.id);
    assert_eq!(books[1].rating, Some(5));
    // Legacy Italian label is stored canonically
    assert_eq!(books[1].genre, "Fiction");
}

#[test]
fn test_missing_file_is_empty_collection() {
    let (_dir, mut store) = setup();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_reported() {
    let (dir, mut store) = setup();
    fs::write(dir.path().join(DEFAULT_BLOB_KEY), "[{\"id\": ").unwrap();
    match store.load() {
        Err(LibrisError::CorruptStore { key, .. }) => assert_eq!(key, DEFAULT_BLOB_KEY),
        other => panic!("expected CorruptStore, got {:?}", other.map(|b| b.len())),
    }
}

#[test]
fn test_reads_legacy_records() {
    let (dir, mut store) = setup();
    let legacy = r#"[
        {
            "id": "7f1c",
            "title": "Se una notte d'inverno un viaggiatore",
            "author": "Italo Calvino",
            "genre": "narrativa",
            "cover_image_uri": "",
            "status": "letto",
            "date_start": "2023-01-02T10:00:00",
            "date_end": "2023-01-20",
            "rating": 0,
            "notes": "   "
        }
    ]"#;
    fs::write(dir.path().join(DEFAULT_BLOB_KEY), legacy).unwrap();

    let books = store.load().unwrap();
    assert_eq!(books.len(), 1);
    let book = &books[0];
    assert_eq!(book.status, BookStatus::Finished);
    assert_eq!(book.rating, None);
    assert_eq!(book.notes, None);
    assert!(!book.favorite);
    assert_eq!(book.read_days(), Some(18));
}

#[test]
fn test_writes_leave_no_tmp_files() {
    let (dir, mut store) = setup();
    for title in ["A", "B", "C"] {
        store.add(input(title, BookStatus::ToRead)).unwrap();
    }

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_creates_missing_data_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("deep").join("shelf");
    let backend = FsBlobStore::new(&nested);
    backend.write_blob("books.json", b"[]").unwrap();
    assert!(nested.join("books.json").exists());
}

#[test]
fn test_rejects_keys_outside_root() {
    let (_dir, store) = setup();
    assert!(store.backend().write_blob("../escape.json", b"[]").is_err());
    assert!(store.backend().read_blob(".hidden").is_err());
}
