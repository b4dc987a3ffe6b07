// sitesort_core/src/domain.rs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Original path inside the archive, `/`-separated.
    pub name: String,
    pub is_dir: bool,
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            content,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            content: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformedEntry {
    /// `folder + base_name`; never more than one `/`.
    pub output_name: String,
    pub content: Vec<u8>,
    pub rewritten: bool,
}
