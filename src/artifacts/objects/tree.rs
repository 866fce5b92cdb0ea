//! Tree object
//!
//! A tree is the flat file list of one snapshot: filename → blob ID, kept in
//! name order so that equal listings always serialize (and hash) identically.
//!
//! ## Format
//!
//! Newline-terminated `<hash> <filename>` records, no header. The same record
//! format is shared by the index file and the `files` section of commits.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Parse a single `<hash> <filename>` record
///
/// Returns `None` for blank or malformed lines; the filename is everything
/// after the first space, so names may contain spaces.
pub fn parse_entry_line(line: &str) -> Option<(String, ObjectId)> {
    let (hash, name) = line.split_once(' ')?;
    if name.is_empty() {
        return None;
    }

    let oid = ObjectId::try_parse(hash.to_string()).ok()?;
    Some((name.to_string(), oid))
}

/// Render a single `<hash> <filename>` record (without the line terminator)
pub fn format_entry_line(name: &str, oid: &ObjectId) -> String {
    format!("{} {}", oid, name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, ObjectId>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    pub fn into_entries(self) -> BTreeMap<String, ObjectId> {
        self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse records leniently, skipping lines that are not valid records
    pub fn from_lines<'l>(lines: impl Iterator<Item = &'l str>) -> Self {
        let entries = lines
            .filter_map(|line| {
                let entry = parse_entry_line(line);
                if entry.is_none() && !line.trim().is_empty() {
                    log::warn!("skipping malformed file entry {:?}", line);
                }
                entry
            })
            .collect();

        Tree { entries }
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(name, oid)| format!("{}\n", format_entry_line(name, oid)))
            .collect::<String>();

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_lines(lines.iter().map(String::as_str)))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
