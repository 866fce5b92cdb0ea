use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the blob hash of a working-tree file, storing the blob when `write` is set
    pub fn hash_object(&mut self, name: &str, write: bool) -> anyhow::Result<ObjectId> {
        let blob = Blob::new(self.workspace().read_file(name)?);

        let object_id = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
