use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Write the raw content of a stored object
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_string())?;
        let content = self.database().get(&object_id)?;

        self.writer().write_all(&content)?;

        Ok(())
    }
}
