//! Commit object
//!
//! Commits represent snapshots of the working tree at specific points in time.
//! They contain:
//! - Parent commit ID (empty for the root commit)
//! - A second parent ID (merge commits only)
//! - The tree object ID of the snapshot
//! - Author text, unix timestamp and message
//! - The snapshot's file list, inlined after a `files` marker
//!
//! ## Format
//!
//! ```text
//! parent <hash-or-empty>
//! merge-parent <hash>
//! tree <hash>
//! author <text>
//! time <unix-seconds>
//! message <first line>
//!  <further message lines, each indented by one space>
//! files
//! <hash> <filename>
//! ```
//!
//! Parsing is lenient: header lines may come in any order and a missing field
//! leaves its default (empty text, zero time, no parent). Indented lines after
//! `message` continue the message, so a body line can never be read back as a
//! header or as the `files` marker.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, format_entry_line};
use bytes::Bytes;
use std::io::BufRead;

const PARENT_KEY: &str = "parent";
const MERGE_PARENT_KEY: &str = "merge-parent";
const TREE_KEY: &str = "tree";
const AUTHOR_KEY: &str = "author";
const TIME_KEY: &str = "time";
const MESSAGE_KEY: &str = "message";
const FILES_MARKER: &str = "files";
const CONTINUATION_PREFIX: char = ' ';

const HEADER_KEYS: [&str; 6] = [
    PARENT_KEY,
    MERGE_PARENT_KEY,
    TREE_KEY,
    AUTHOR_KEY,
    TIME_KEY,
    MESSAGE_KEY,
];

/// Split `key value` header lines; a bare `key` yields an empty value
fn split_header(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(' ').unwrap_or((line, ""));
    HEADER_KEYS.contains(&key).then_some((key, value))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    parent: Option<ObjectId>,
    second_parent: Option<ObjectId>,
    tree_oid: Option<ObjectId>,
    author: String,
    timestamp: i64,
    message: String,
    files: Tree,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        files: Tree,
        author: String,
        timestamp: i64,
        message: String,
    ) -> Self {
        Commit {
            parent,
            second_parent: None,
            tree_oid: Some(tree_oid),
            author,
            timestamp,
            message,
            files,
        }
    }

    /// Turn this commit into a merge commit with a second parent
    pub fn with_second_parent(mut self, second_parent: ObjectId) -> Self {
        self.second_parent = Some(second_parent);
        self
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn tree_oid(&self) -> Option<&ObjectId> {
        self.tree_oid.as_ref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the commit message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// The snapshot's file list
    pub fn files(&self) -> &Tree {
        &self.files
    }

    /// Parse the textual form of a commit, defaulting whatever is missing
    pub fn parse(content: &str) -> Self {
        let mut commit = Commit::default();
        let mut lines = content.lines();
        let mut in_message = false;

        for line in lines.by_ref() {
            if in_message && let Some(continued) = line.strip_prefix(CONTINUATION_PREFIX) {
                commit.message.push('\n');
                commit.message.push_str(continued);
                continue;
            }

            if line == FILES_MARKER {
                break;
            }

            match split_header(line) {
                Some((PARENT_KEY, value)) => commit.parent = Self::parse_oid(value),
                Some((MERGE_PARENT_KEY, value)) => commit.second_parent = Self::parse_oid(value),
                Some((TREE_KEY, value)) => commit.tree_oid = Self::parse_oid(value),
                Some((AUTHOR_KEY, value)) => commit.author = value.to_string(),
                Some((TIME_KEY, value)) => commit.timestamp = value.trim().parse().unwrap_or(0),
                Some((MESSAGE_KEY, value)) => {
                    commit.message = value.to_string();
                    in_message = true;
                    continue;
                }
                _ if in_message => {
                    commit.message.push('\n');
                    commit.message.push_str(line);
                    continue;
                }
                _ => log::debug!("ignoring unknown commit line {:?}", line),
            }
            in_message = false;
        }

        commit.files = Tree::from_lines(lines);
        commit
    }

    fn parse_oid(value: &str) -> Option<ObjectId> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        ObjectId::try_parse(value.to_string())
            .inspect_err(|e| log::warn!("ignoring invalid object id in commit: {e}"))
            .ok()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        lines.push(format!(
            "{} {}",
            PARENT_KEY,
            self.parent.as_ref().map(ObjectId::as_ref).unwrap_or("")
        ));
        if let Some(second_parent) = &self.second_parent {
            lines.push(format!("{} {}", MERGE_PARENT_KEY, second_parent));
        }
        if let Some(tree_oid) = &self.tree_oid {
            lines.push(format!("{} {}", TREE_KEY, tree_oid));
        }
        lines.push(format!("{} {}", AUTHOR_KEY, self.author));
        lines.push(format!("{} {}", TIME_KEY, self.timestamp));
        let mut message_lines = self.message.split('\n');
        lines.push(format!(
            "{} {}",
            MESSAGE_KEY,
            message_lines.next().unwrap_or_default()
        ));
        lines.extend(message_lines.map(|line| format!("{CONTINUATION_PREFIX}{line}")));
        lines.push(FILES_MARKER.to_string());
        for (name, oid) in self.files.entries() {
            lines.push(format_entry_line(name, oid));
        }

        let mut content = lines.join("\n");
        content.push('\n');

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::parse(&String::from_utf8_lossy(&content)))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
