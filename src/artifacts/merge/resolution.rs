//! Per-file three-way resolution
//!
//! Each file is looked up in the base, ours and theirs snapshots and its blob
//! hashes are compared (equal hash means equal content):
//!
//! | ours vs theirs | ours vs base | theirs vs base | result                |
//! |----------------|--------------|----------------|-----------------------|
//! | equal          | -            | -              | take it (or absent)   |
//! | differ         | equal        | -              | take theirs           |
//! | differ         | -            | equal          | take ours             |
//! | differ         | differ       | differ         | conflict              |
//!
//! "Absent" participates like any other value, so a file created on one side
//! only is taken, a file deleted on one side and untouched on the other is
//! removed, and a file deleted on one side but modified on the other conflicts.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// Both sides hold different content (modified or created differently)
    BothModified { ours: ObjectId, theirs: ObjectId },
    /// Ours removed the file, theirs modified it
    DeletedByUs { theirs: ObjectId },
    /// Theirs removed the file, ours modified it
    DeletedByThem { ours: ObjectId },
}

impl ConflictKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ConflictKind::BothModified { .. } => "content",
            ConflictKind::DeletedByUs { .. } => "modify/delete",
            ConflictKind::DeletedByThem { .. } => "delete/modify",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// The merged file has this content
    Take(ObjectId),
    /// The merged snapshot does not contain the file
    Remove,
    Conflict(ConflictKind),
}

pub fn resolve(
    base: Option<&ObjectId>,
    ours: Option<&ObjectId>,
    theirs: Option<&ObjectId>,
) -> FileResolution {
    let take = |side: Option<&ObjectId>| match side {
        Some(oid) => FileResolution::Take(oid.clone()),
        None => FileResolution::Remove,
    };

    if ours == theirs {
        return take(ours);
    }
    if ours == base {
        return take(theirs);
    }
    if theirs == base {
        return take(ours);
    }

    match (ours, theirs) {
        (Some(ours), Some(theirs)) => FileResolution::Conflict(ConflictKind::BothModified {
            ours: ours.clone(),
            theirs: theirs.clone(),
        }),
        (None, Some(theirs)) => FileResolution::Conflict(ConflictKind::DeletedByUs {
            theirs: theirs.clone(),
        }),
        (Some(ours), None) => FileResolution::Conflict(ConflictKind::DeletedByThem {
            ours: ours.clone(),
        }),
        // equal sides returned above
        (None, None) => FileResolution::Remove,
    }
}

/// Resolution for every file named in any of the three snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    files: BTreeMap<String, FileResolution>,
}

impl MergePlan {
    pub fn build(base: &Tree, ours: &Tree, theirs: &Tree) -> Self {
        let names = base
            .entries()
            .keys()
            .chain(ours.entries().keys())
            .chain(theirs.entries().keys())
            .collect::<BTreeSet<_>>();

        let files = names
            .into_iter()
            .map(|name| {
                let resolution = resolve(base.get(name), ours.get(name), theirs.get(name));
                log::debug!("merge {}: {:?}", name, resolution);
                (name.clone(), resolution)
            })
            .collect();

        MergePlan { files }
    }

    pub fn files(&self) -> impl Iterator<Item = (&String, &FileResolution)> {
        self.files.iter()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = (&String, &ConflictKind)> {
        self.files.iter().filter_map(|(name, resolution)| match resolution {
            FileResolution::Conflict(kind) => Some((name, kind)),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts().next().is_none()
    }
}
