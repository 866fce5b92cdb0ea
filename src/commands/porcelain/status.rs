use crate::areas::index::StagedChange;
use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

/// How a staged file compares with the current head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedState {
    Added,
    Modified,
    Deleted,
    Unmodified,
}

impl StagedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StagedState::Added => "added",
            StagedState::Modified => "modified",
            StagedState::Deleted => "deleted",
            StagedState::Unmodified => "unmodified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub branch: Option<String>,
    pub staged: Vec<(String, StagedState)>,
}

impl Repository {
    /// Report the current branch and classify every staged file
    pub fn status(&mut self) -> anyhow::Result<Status> {
        let head = self
            .current_branch()
            .and_then(|branch| branch.head().cloned());
        let snapshot = self.snapshot_of(head.as_ref())?;

        let staged = self
            .index()
            .entries()
            .map(|(name, change)| {
                let state = match (change, snapshot.get(name)) {
                    (StagedChange::Remove, _) => StagedState::Deleted,
                    (StagedChange::Update(_), None) => StagedState::Added,
                    (StagedChange::Update(oid), Some(committed)) if committed != oid => {
                        StagedState::Modified
                    }
                    (StagedChange::Update(_), Some(_)) => StagedState::Unmodified,
                };
                (name.clone(), state)
            })
            .collect::<Vec<_>>();

        let status = Status {
            branch: self.current_branch().map(|branch| branch.name().to_string()),
            staged,
        };

        let mut writer = self.writer();
        match &status.branch {
            Some(branch) => writeln!(writer, "On branch {branch}")?,
            None => writeln!(writer, "Not currently on any branch")?,
        }
        if status.staged.is_empty() {
            writeln!(writer, "nothing staged")?;
        } else {
            writeln!(writer, "Changes to be committed:")?;
            for (name, state) in &status.staged {
                let label = format!("{:<11}", format!("{}:", state.as_str()));
                writeln!(writer, "\t{}{}", label.green(), name.green())?;
            }
        }

        Ok(status)
    }
}
