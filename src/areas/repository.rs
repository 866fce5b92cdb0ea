use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch::{Branch, BranchArena, BranchId};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::graph::commit_graph::{CommitGraph, CommitNode};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Name of the repository directory inside the working tree
pub const REPOSITORY_DIR: &str = ".babygit";

/// Handle on one repository
///
/// Every operation goes through an explicit `Repository` value: the persisted
/// areas (objects, index, refs, working tree), the branch arena with the
/// currently checked-out branch, and the commit cache.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    workspace: Workspace,
    refs: Refs,
    branches: BranchArena,
    current_branch: Option<BranchId>,
    commits: CommitGraph,
}

impl Repository {
    pub(crate) fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve repository path {}", path.display()))?;
        let git_path = path.join(REPOSITORY_DIR);

        Ok(Repository {
            writer: RefCell::new(writer),
            database: Database::new(git_path.join("objects").into_boxed_path()),
            index: Index::new(git_path.join("index").into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(git_path.into_boxed_path()),
            branches: BranchArena::new(),
            current_branch: None,
            commits: CommitGraph::new(),
            path: path.into_boxed_path(),
        })
    }

    /// Rehydrate an existing repository from its ref, object and index files
    pub fn load(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let mut repository = Self::new(path, writer)?;

        if !repository.refs.head_path().exists() {
            return Err(RepositoryError::NotARepository(repository.git_path()).into());
        }

        repository.index.rehydrate()?;

        // heads are resolved through the commit cache on first use
        for name in repository.refs.list_branches()? {
            let head = repository.refs.read_ref(&name)?;
            repository.branches.insert(name, head, None)?;
        }

        if let Some(head_branch) = repository.refs.read_head()? {
            let id = match repository.branches.find(head_branch.as_ref()) {
                Some(id) => id,
                // HEAD may name a branch whose ref file was never written
                None => repository.branches.insert(head_branch, None, None)?,
            };
            repository.current_branch = Some(id);
        }

        log::debug!(
            "loaded repository at {} with {} branches",
            repository.path.display(),
            repository.branches.len()
        );

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn branches(&self) -> &BranchArena {
        &self.branches
    }

    pub fn branch(&self, id: BranchId) -> &Branch {
        self.branches.get(id)
    }

    pub fn find_branch(&self, name: &str) -> Option<&Branch> {
        self.branches.find(name).map(|id| self.branches.get(id))
    }

    pub fn current_branch_id(&self) -> Option<BranchId> {
        self.current_branch
    }

    pub fn current_branch(&self) -> Option<&Branch> {
        self.current_branch.map(|id| self.branches.get(id))
    }

    pub(crate) fn register_branch(
        &mut self,
        name: BranchName,
        head: Option<ObjectId>,
        forked_from: Option<BranchId>,
    ) -> anyhow::Result<BranchId> {
        self.branches.insert(name, head, forked_from)
    }

    pub(crate) fn set_current_branch(&mut self, id: BranchId) {
        self.current_branch = Some(id);
    }

    /// Update a branch head in memory only
    pub(crate) fn set_branch_head(&mut self, id: BranchId, head: Option<ObjectId>) {
        self.branches.set_head(id, head);
    }

    /// Move a branch to a new head and persist its ref file
    ///
    /// The commit must already be in the object store.
    pub(crate) fn advance_branch(&mut self, id: BranchId, head: ObjectId) -> anyhow::Result<()> {
        let name = self.branches.get(id).name().clone();
        self.refs.update_ref(&name, Some(&head))?;
        self.branches.set_head(id, Some(head));

        Ok(())
    }

    pub fn load_commit(&mut self, oid: &ObjectId) -> anyhow::Result<Rc<CommitNode>> {
        self.commits.load(&self.database, oid)
    }

    pub(crate) fn cache_commit(&mut self, oid: ObjectId, commit: Commit) -> Rc<CommitNode> {
        self.commits.insert(oid, commit)
    }

    pub fn find_common_ancestor(
        &mut self,
        a: &ObjectId,
        b: &ObjectId,
    ) -> anyhow::Result<Option<Rc<CommitNode>>> {
        self.commits.find_common_ancestor(&self.database, a, b)
    }

    /// File list of a commit; an absent commit has no files
    pub fn snapshot_of(&mut self, oid: Option<&ObjectId>) -> anyhow::Result<Tree> {
        let Some(oid) = oid else {
            return Ok(Tree::default());
        };

        let node = self.load_commit(oid)?;
        match node.tree_oid() {
            // commits written without an inline list still reference their tree
            Some(tree_oid) if node.files().is_empty() => self.database.load_tree(tree_oid),
            _ => Ok(node.files().clone()),
        }
    }
}
