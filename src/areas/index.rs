//! Staging index
//!
//! The index holds the changes staged for the next commit, one record per
//! line in `.babygit/index`: `<hash> <filename>` stages a file's content and
//! `- <filename>` stages its removal. It is cleared by every commit.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{format_entry_line, parse_entry_line};
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

const REMOVAL_MARKER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedChange {
    /// Record the file with this blob
    Update(ObjectId),
    /// Drop the file from the next snapshot
    Remove,
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.babygit/index`)
    path: Box<Path>,
    /// Staged changes mapped by file name
    entries: BTreeMap<String, StagedChange>,
    /// Whether the in-memory entries differ from the file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the entries from the index file
    ///
    /// A missing file is an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read index file {}", self.path.display()))?;

        for line in content.lines().filter(|line| !line.is_empty()) {
            match Self::parse_line(line) {
                Some((name, change)) => {
                    self.entries.insert(name, change);
                }
                None => log::warn!("skipping malformed index line {:?}", line),
            }
        }

        Ok(())
    }

    fn parse_line(line: &str) -> Option<(String, StagedChange)> {
        match line.split_once(' ') {
            Some((REMOVAL_MARKER, name)) if !name.is_empty() => {
                Some((name.to_string(), StagedChange::Remove))
            }
            _ => parse_entry_line(line).map(|(name, oid)| (name, StagedChange::Update(oid))),
        }
    }

    /// Stage `name` at `oid`, replacing any earlier entry for the same name
    pub fn add(&mut self, name: String, oid: ObjectId) {
        self.stage(name, StagedChange::Update(oid));
    }

    /// Stage the removal of `name`, replacing any earlier entry for it
    pub fn remove(&mut self, name: String) {
        self.stage(name, StagedChange::Remove);
    }

    fn stage(&mut self, name: String, change: StagedChange) {
        if self.entries.get(&name) != Some(&change) {
            self.entries.insert(name, change);
            self.changed = true;
        }
    }

    /// Blob staged for `name`; `None` when nothing or a removal is staged
    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        match self.entries.get(name) {
            Some(StagedChange::Update(oid)) => Some(oid),
            _ => None,
        }
    }

    pub fn is_removed(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(StagedChange::Remove))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &StagedChange)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.changed = true;
        }
        self.entries.clear();
    }

    /// Persist the entries, truncating the index file
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let content = self
            .entries
            .iter()
            .map(|(name, change)| match change {
                StagedChange::Update(oid) => format!("{}\n", format_entry_line(name, oid)),
                StagedChange::Remove => format!("{} {}\n", REMOVAL_MARKER, name),
            })
            .collect::<String>();

        std::fs::write(&self.path, content)
            .with_context(|| format!("Unable to write index file {}", self.path.display()))?;
        self.changed = false;

        Ok(())
    }
}
