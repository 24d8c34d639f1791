//! Whole-collection persistence over flat JSON files.
//!
//! Each entity type lives in its own file holding one top-level array. Reads
//! load the whole array, writes replace the whole file. A write goes to a
//! temporary file in the data directory that is then renamed over the target,
//! so readers only ever see a complete collection.
//!
//! Read-modify-write sequences go through [`RecordStore::mutate`], which holds
//! a per-collection lock for the whole sequence. Plain reads take no lock.

use crate::error::{ApiError, ApiResult};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

/// The three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Customers,
    Products,
    Invoices,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Customers,
        Collection::Products,
        Collection::Invoices,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Customers => "customers.json",
            Collection::Products => "products.json",
            Collection::Invoices => "invoices.json",
        }
    }

    fn index(self) -> usize {
        match self {
            Collection::Customers => 0,
            Collection::Products => 1,
            Collection::Invoices => 2,
        }
    }
}

/// Handle to the data directory. Cheap to clone; clones share the locks.
#[derive(Clone)]
pub struct RecordStore {
    data_dir: Arc<PathBuf>,
    locks: Arc<[Mutex<()>; 3]>,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        RecordStore {
            data_dir: Arc::new(data_dir.into()),
            locks: Arc::new([Mutex::new(()), Mutex::new(()), Mutex::new(())]),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Creates the data directory and seeds every missing collection file
    /// with an empty array. Existing files are left untouched.
    pub fn init(&self) -> io::Result<()> {
        fs::create_dir_all(self.data_dir.as_path())?;
        for collection in Collection::ALL {
            let path = self.path(collection);
            if !path.exists() {
                fs::write(&path, "[]")?;
                info!("initialized empty collection at {}", path.display());
            }
        }
        Ok(())
    }

    /// Loads a collection in store order.
    ///
    /// A missing file is an empty collection. Any other read or parse failure
    /// is logged and also reported as an empty collection, so listings and
    /// reports stay available when a file is damaged.
    pub fn load_all<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        match self.try_load_all(collection) {
            Ok(records) => records,
            Err(e) => {
                error!("error reading {}: {}", collection.file_name(), e);
                Vec::new()
            }
        }
    }

    /// Strict variant of [`load_all`](Self::load_all): only a missing file
    /// yields an empty collection, everything else is an error.
    pub fn try_load_all<T: DeserializeOwned>(&self, collection: Collection) -> ApiResult<Vec<T>> {
        let path = self.path(collection);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} absent, treating as empty", path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(ApiError::Io { path, source }),
        };
        serde_json::from_slice(&raw).map_err(|source| ApiError::Corrupt { path, source })
    }

    /// Replaces the persisted collection with `records`.
    pub fn save_all<T: Serialize>(&self, collection: Collection, records: &[T]) -> ApiResult<()> {
        let path = self.path(collection);
        self.write_atomically(&path, records).map_err(|source| {
            error!("error writing {}: {}", path.display(), source);
            ApiError::Io {
                path: path.clone(),
                source,
            }
        })
    }

    fn write_atomically<T: Serialize>(&self, path: &Path, records: &[T]) -> io::Result<()> {
        fs::create_dir_all(self.data_dir.as_path())?;
        let mut tmp = NamedTempFile::new_in(self.data_dir.as_path())?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Runs a read-modify-write on one collection while holding its lock.
    ///
    /// The collection is loaded strictly (a damaged file fails the request
    /// instead of being overwritten), handed to `apply`, and written back only
    /// if `apply` succeeds.
    pub async fn mutate<T, R, F>(&self, collection: Collection, apply: F) -> ApiResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> ApiResult<R>,
    {
        let _guard = self.locks[collection.index()].lock().await;
        let mut records = self.try_load_all(collection)?;
        let outcome = apply(&mut records)?;
        self.save_all(collection, &records)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::invoice::Invoice;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
    }

    fn row(id: &str) -> Row {
        Row { id: id.to_string() }
    }

    #[test]
    fn init_creates_directory_and_empty_collections() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("data"));

        store.init().unwrap();

        for collection in Collection::ALL {
            let raw = fs::read_to_string(store.path(collection)).unwrap();
            assert_eq!(raw, "[]");
        }
    }

    #[test]
    fn init_keeps_existing_records() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        store.save_all(Collection::Products, &[row("1")]).unwrap();

        store.init().unwrap();

        let rows: Vec<Row> = store.load_all(Collection::Products);
        assert_eq!(rows, vec![row("1")]);
    }

    #[test]
    fn missing_collection_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let rows: Vec<Row> = store.try_load_all(Collection::Invoices).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        let rows = vec![row("3"), row("1"), row("2")];

        store.save_all(Collection::Customers, &rows).unwrap();

        assert_eq!(store.load_all::<Row>(Collection::Customers), rows);
    }

    #[test]
    fn malformed_collection_fails_open_for_reads_only() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        fs::write(store.path(Collection::Customers), "{not json").unwrap();

        assert!(store.load_all::<Row>(Collection::Customers).is_empty());
        assert!(matches!(
            store.try_load_all::<Row>(Collection::Customers),
            Err(ApiError::Corrupt { .. })
        ));
    }

    #[actix_web::test]
    async fn legacy_invoices_with_null_numbers_stay_usable() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        fs::write(
            store.path(Collection::Invoices),
            r#"[
  {"id": "1", "invoiceNumber": "INV-001", "items": [], "subtotal": 10, "tax": 0, "discount": 0, "total": 10},
  {"id": "2", "invoiceNumber": "INV-002", "items": [{"productId": "7", "quantity": null, "price": 10, "total": null}], "subtotal": 10, "tax": 0, "discount": null, "total": null}
]"#,
        )
        .unwrap();

        let invoices: Vec<Invoice> = store.load_all(Collection::Invoices);
        assert_eq!(invoices.len(), 2);
        assert_eq!(invoices[1].total, 0.0);

        store
            .mutate(Collection::Invoices, |rows: &mut Vec<Invoice>| {
                rows.retain(|invoice| invoice.id != "1");
                Ok(())
            })
            .await
            .unwrap();

        let remaining: Vec<Invoice> = store.try_load_all(Collection::Invoices).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].invoice_number, "INV-002");
    }

    #[actix_web::test]
    async fn mutate_persists_successful_changes() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());

        let len = store
            .mutate(Collection::Products, |rows: &mut Vec<Row>| {
                rows.push(row("9"));
                Ok(rows.len())
            })
            .await
            .unwrap();

        assert_eq!(len, 1);
        assert_eq!(store.load_all::<Row>(Collection::Products), vec![row("9")]);
    }

    #[actix_web::test]
    async fn mutate_discards_failed_changes() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        store.save_all(Collection::Products, &[row("1")]).unwrap();

        let result = store
            .mutate(Collection::Products, |rows: &mut Vec<Row>| -> ApiResult<()> {
                rows.clear();
                Err(ApiError::NotFound("Product"))
            })
            .await;

        assert!(matches!(result, Err(ApiError::NotFound("Product"))));
        assert_eq!(store.load_all::<Row>(Collection::Products), vec![row("1")]);
    }

    #[actix_web::test]
    async fn mutate_refuses_to_overwrite_damaged_collection() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        fs::write(store.path(Collection::Invoices), "garbage").unwrap();

        let result = store
            .mutate(Collection::Invoices, |rows: &mut Vec<Row>| {
                rows.push(row("1"));
                Ok(())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(
            fs::read_to_string(store.path(Collection::Invoices)).unwrap(),
            "garbage"
        );
    }
}
