//! Object store
//!
//! Content-addressed persistence: every object lives in `objects/<hash>` where
//! `<hash>` is the SHA-1 digest of its serialized bytes. Objects are written
//! once, never modified and never deleted.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist raw content under its digest and return the digest
    ///
    /// Writing content that is already present is a no-op.
    pub fn put(&self, content: &[u8]) -> anyhow::Result<ObjectId> {
        let object_id = ObjectId::digest(content);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            log::trace!("object {} already stored", object_id);
        } else {
            self.write_object(&object_path, content)?;
            log::debug!("stored object {} ({} bytes)", object_id, content.len());
        }

        Ok(object_id)
    }

    /// Read back exactly the bytes stored under `object_id`
    ///
    /// A missing object yields `RepositoryError::ObjectNotFound`.
    pub fn get(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(RepositoryError::ObjectNotFound(object_id.clone()).into())
            }
            Err(e) => Err(e).with_context(|| {
                format!("Unable to read object file {}", object_path.display())
            }),
        }
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).exists()
    }

    /// Serialize and persist a typed object
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let content = object.serialize()?;
        let object_id = self.put(&content)?;
        log::trace!("{} {} written", object.object_type(), object_id);

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Blob::deserialize(Cursor::new(self.get(object_id)?))
    }

    pub fn load_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        Tree::deserialize(Cursor::new(self.get(object_id)?))
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        Commit::deserialize(Cursor::new(self.get(object_id)?))
    }

    /// Number of stored objects
    pub fn count(&self) -> anyhow::Result<usize> {
        let entries = std::fs::read_dir(&self.path).with_context(|| {
            format!("Unable to list objects directory {}", self.path.display())
        })?;

        Ok(entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .count())
    }

    fn write_object(&self, object_path: &Path, content: &[u8]) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path).with_context(|| {
            format!("Unable to create object directory {}", self.path.display())
        })?;

        let temp_object_path = Self::temp_path_for(object_path);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .with_context(|| {
                format!("Unable to open object file {}", temp_object_path.display())
            })?;

        file.write_all(content).with_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // the rename makes the object appear fully written or not at all
        std::fs::rename(&temp_object_path, object_path).with_context(|| {
            format!("Unable to rename object file to {}", object_path.display())
        })?;

        Ok(())
    }

    fn temp_path_for(object_path: &Path) -> PathBuf {
        let file_name = object_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        object_path.with_file_name(format!("tmp-obj-{}", file_name))
    }
}
