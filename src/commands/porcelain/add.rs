use crate::areas::repository::Repository;
use anyhow::Context;
use std::collections::BTreeSet;

const ALL_FILES: &str = ".";

impl Repository {
    /// Stage working-tree files, replacing earlier entries for the same name
    ///
    /// A tracked file missing from the working tree is staged for removal.
    /// `.` stages every regular file directly inside the working directory
    /// along with the removal of every tracked file that is gone.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let head = self
            .current_branch()
            .and_then(|branch| branch.head().cloned());
        let tracked = self.snapshot_of(head.as_ref())?;

        let mut names = BTreeSet::new();
        for path in paths {
            let path = path.trim_start_matches("./");
            if path == ALL_FILES || path.is_empty() {
                names.extend(self.workspace().list_files()?);
                names.extend(
                    tracked
                        .entries()
                        .keys()
                        .filter(|name| !self.workspace().exists(name))
                        .cloned(),
                );
            } else if path.contains('/') {
                anyhow::bail!("'{path}' is outside the top level of the working tree");
            } else {
                names.insert(path.to_string());
            }
        }

        for name in names {
            if !self.workspace().exists(&name)
                && (tracked.get(&name).is_some() || self.index().get(&name).is_some())
            {
                log::debug!("staged removal of {name}");
                self.index_mut().remove(name);
                continue;
            }

            let content = self
                .workspace()
                .read_file(&name)
                .with_context(|| format!("Unable to stage '{name}'"))?;
            let oid = self.database().put(&content)?;

            log::debug!("staged {name} as {}", oid.to_short_oid());
            self.index_mut().add(name, oid);
        }

        if self.index().is_changed() {
            self.index_mut().write_updates()?;
        }

        Ok(())
    }
}
