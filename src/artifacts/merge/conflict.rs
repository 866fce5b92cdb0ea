use bytes::Bytes;

pub const OURS_MARKER: &str = "<<<<<<< ours";
pub const SEPARATOR_MARKER: &str = "=======";
pub const THEIRS_MARKER: &str = ">>>>>>> theirs";
const DELETED_LABEL: &str = " (deleted)";

/// Build the text left in the working tree for a conflicted file
///
/// `None` stands for a side that deleted the file: its section is empty and
/// its marker carries a `(deleted)` label.
pub fn conflict_markers(ours: Option<&[u8]>, theirs: Option<&[u8]>) -> Bytes {
    let mut merged = Vec::new();

    push_marker(&mut merged, OURS_MARKER, ours.is_none());
    push_section(&mut merged, ours);
    push_marker(&mut merged, SEPARATOR_MARKER, false);
    push_section(&mut merged, theirs);
    push_marker(&mut merged, THEIRS_MARKER, theirs.is_none());

    merged.into()
}

fn push_marker(merged: &mut Vec<u8>, marker: &str, deleted: bool) {
    merged.extend_from_slice(marker.as_bytes());
    if deleted {
        merged.extend_from_slice(DELETED_LABEL.as_bytes());
    }
    merged.push(b'\n');
}

fn push_section(merged: &mut Vec<u8>, content: Option<&[u8]>) {
    let Some(content) = content.filter(|content| !content.is_empty()) else {
        return;
    };

    merged.extend_from_slice(content);
    // markers must start on their own line
    if !content.ends_with(b"\n") {
        merged.push(b'\n');
    }
}
