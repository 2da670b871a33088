// storefront/src/catalog/backend.rs

//! Persistence backends for the single catalog record.
//!
//! A backend stores one opaque byte blob. The store decides what the bytes
//! mean; backends only move them.

use anyhow::Context as AnyhowContext;
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{event, Level};

/// Record name the browser storefront keeps its catalog under.
pub const DEFAULT_RECORD_NAME: &str = "mcr_products_db_v1";

/// Storage for the catalog record.
///
/// `read` returns `Ok(None)` when no record has ever been written. Both
/// methods report failures as `anyhow::Error`; the store decides which of
/// them are fatal.
pub trait CatalogBackend: Send + Sync {
  fn read(&self) -> anyhow::Result<Option<Vec<u8>>>;

  /// Replaces the whole record.
  fn write(&self, bytes: &[u8]) -> anyhow::Result<()>;
}

impl<B: CatalogBackend + ?Sized> CatalogBackend for Arc<B> {
  fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
    (**self).read()
  }

  fn write(&self, bytes: &[u8]) -> anyhow::Result<()> {
    (**self).write(bytes)
  }
}

#[derive(Debug, Default)]
struct MemoryRecord {
  bytes: Option<Vec<u8>>,
  fail_reads: bool,
  fail_writes: bool,
  writes: usize,
}

/// In-memory record. Clones share the same record, so a test can keep one
/// handle for inspection while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
  inner: Arc<Mutex<MemoryRecord>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts with an arbitrary record, valid JSON or not.
  pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
    let backend = Self::default();
    backend.inner.lock().bytes = Some(bytes.into());
    backend
  }

  /// Makes every following read fail, as an unreadable record would.
  pub fn fail_reads(&self, fail: bool) {
    self.inner.lock().fail_reads = fail;
  }

  /// Makes every following write fail, as a full quota would.
  pub fn fail_writes(&self, fail: bool) {
    self.inner.lock().fail_writes = fail;
  }

  /// Number of successful writes so far.
  pub fn write_count(&self) -> usize {
    self.inner.lock().writes
  }

  pub fn snapshot(&self) -> Option<Vec<u8>> {
    self.inner.lock().bytes.clone()
  }
}

impl CatalogBackend for MemoryBackend {
  fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
    let record = self.inner.lock();
    if record.fail_reads {
      anyhow::bail!("record is not readable");
    }
    Ok(record.bytes.clone())
  }

  fn write(&self, bytes: &[u8]) -> anyhow::Result<()> {
    let mut record = self.inner.lock();
    if record.fail_writes {
      anyhow::bail!("storage quota exceeded");
    }
    record.bytes = Some(bytes.to_vec());
    record.writes += 1;
    Ok(())
  }
}

/// Record kept as `<dir>/<name>.json` on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
  path: PathBuf,
}

impl FileBackend {
  /// The directory is created on first write, not here.
  pub fn new(dir: impl AsRef<Path>, record_name: &str) -> Self {
    Self {
      path: dir.as_ref().join(format!("{record_name}.json")),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl CatalogBackend for FileBackend {
  fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
    match fs::read(&self.path) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        event!(Level::TRACE, path = %self.path.display(), "No catalog record on disk.");
        Ok(None)
      }
      Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
    }
  }

  fn write(&self, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(dir) = self.path.parent() {
      fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    // The record on disk is only ever replaced whole.
    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, bytes).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &self.path).with_context(|| format!("replacing {}", self.path.display()))?;
    event!(Level::TRACE, path = %self.path.display(), len = bytes.len(), "Catalog record written.");
    Ok(())
  }
}
