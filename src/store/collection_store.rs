use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::{Codec, Format, KeyQueue, StoreError};
use crate::address::CollectionKey;
use crate::record::Record;

/// One data file per collection, with per-key serialized access.
///
/// Built once at startup and shared behind an `Arc`. Both `read` and
/// `atomic_modify` wait for their key's turn, so a reader never observes a
/// file while a writer replaces it, and two writers never compute from the
/// same snapshot.
pub struct CollectionStore {
    root: PathBuf,
    codec: Box<dyn Codec>,
    queue: KeyQueue,
}

impl CollectionStore {
    /// Open a store over an existing, writable directory.
    pub fn open(root: impl Into<PathBuf>, format: Format) -> Result<Self, StoreError> {
        Self::with_codec(root, format.codec())
    }

    pub fn with_codec(root: impl Into<PathBuf>, codec: Box<dyn Codec>) -> Result<Self, StoreError> {
        let root = root.into();
        let attr = std::fs::metadata(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;

        if !attr.is_dir() {
            return Err(StoreError::Io {
                path: root,
                source: io::Error::other("data path must be a directory"),
            });
        }

        let root = root.canonicalize().map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;

        Ok(CollectionStore {
            root,
            codec,
            queue: KeyQueue::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the data file backing `key`.
    pub fn collection_path(&self, key: &CollectionKey) -> PathBuf {
        self.root.join(key.file_name(self.codec.extension()))
    }

    /// Load every record of a collection, in file order.
    ///
    /// A missing data file is `StoreError::NotFound`, never an empty
    /// collection.
    pub async fn read(&self, key: &CollectionKey) -> Result<Vec<Record>, StoreError> {
        let _turn = self.queue.acquire(key.as_str()).await?;
        self.load(&self.collection_path(key)).await
    }

    /// Read-modify-write a collection as one step.
    ///
    /// `modify` receives the current records and returns the records to
    /// persist plus a value handed back to the caller. The value is only
    /// returned once the new contents are on disk; if persisting fails the
    /// file keeps its previous contents and the error is returned instead.
    pub async fn atomic_modify<F, T>(&self, key: &CollectionKey, modify: F) -> Result<T, StoreError>
    where
        F: FnOnce(Vec<Record>) -> (Vec<Record>, T),
    {
        self.try_modify(key, |records| Ok::<_, StoreError>(modify(records)))
            .await
    }

    /// Like [`atomic_modify`](Self::atomic_modify), but `modify` may refuse.
    ///
    /// When `modify` returns an error nothing is written and the error is
    /// handed back as is.
    pub async fn try_modify<F, T, E>(&self, key: &CollectionKey, modify: F) -> Result<T, E>
    where
        F: FnOnce(Vec<Record>) -> Result<(Vec<Record>, T), E>,
        E: From<StoreError>,
    {
        let _turn = self.queue.acquire(key.as_str()).await?;
        let path = self.collection_path(key);

        let current = self.load(&path).await?;
        let (updated, outcome) = modify(current)?;
        self.persist(&path, &updated).await?;

        Ok(outcome)
    }

    async fn load(&self, path: &Path) -> Result<Vec<Record>, StoreError> {
        tracing::debug!("Reading {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        self.codec.decode(&bytes).map_err(|source| StoreError::Codec {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whole-file rewrite: encode, write a hidden sibling, then rename over
    /// the original so readers only ever see a complete file.
    async fn persist(&self, path: &Path, records: &[Record]) -> Result<(), StoreError> {
        let bytes = self.codec.encode(records).map_err(|source| StoreError::Codec {
            path: path.to_path_buf(),
            source,
        })?;

        let staging = staging_path(path);
        tracing::debug!("Writing {} records to {}", records.len(), path.display());

        let written = write_and_sync(&staging, &bytes).await;
        let result = match written {
            Ok(()) => tokio::fs::rename(&staging, path).await,
            Err(e) => Err(e),
        };

        if let Err(source) = result {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
        Ok(())
    }
}

/// `.widgets.yml.tmp` next to `widgets.yml`. Collection keys never start with
/// a dot, so this name cannot collide with another collection.
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

async fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
