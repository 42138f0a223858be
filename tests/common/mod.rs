//! Shared test utilities: an in-memory metadata store plus seeding helpers,
//! and a scratch datalake directory for artifact-store fixtures.

use itx_visa_pipeline::metadata::{schema, MetadataStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod db_seeding;

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A unique scratch directory per test, under `target/`-adjacent
/// `test_output/`, so parallel tests never collide on the same datalake
/// root.
pub fn unique_test_dir(test_name: &str) -> PathBuf {
    let dir = PathBuf::from("test_output").join(format!(
        "{}_{}_{}",
        test_name,
        std::process::id(),
        TEST_COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// An on-disk metadata store (rusqlite's `:memory:` mode does not survive
/// being wrapped across connections the way the CLI commands expect, so
/// tests use a scratch file instead) seeded with the production schema.
pub struct TestMetadataStore {
    path: PathBuf,
}

impl TestMetadataStore {
    pub fn new(test_name: &str) -> Self {
        let dir = unique_test_dir(test_name);
        let path = dir.join("metadata.db");
        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            schema::setup_schema(&conn).unwrap();
        }
        Self { path }
    }

    pub fn open(&self) -> MetadataStore {
        MetadataStore::open(&self.path.to_string_lossy()).unwrap()
    }

    pub fn connection(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(&self.path).unwrap()
    }

    /// The scratch database file's path, for tests driving the CLI's own
    /// `--database-path` override instead of calling `MetadataStore`
    /// directly.
    pub fn db_path(&self) -> PathBuf {
        self.path.clone()
    }
}

impl Drop for TestMetadataStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
