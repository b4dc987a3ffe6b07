use serde::{Deserialize, Serialize};

/// What happened to one input file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub source: String,
    pub output: String,
    pub folder: String,
    pub rewritten: bool,
    pub size: u64,
    /// BLAKE3 of the emitted content, hex.
    pub blake3: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorgReport {
    pub entries: Vec<ReportRow>,
    /// Output names written more than once; the last write won.
    pub collisions: Vec<String>,
    pub skipped_dirs: u64,
}

impl ReorgReport {
    pub fn rewritten_count(&self) -> usize {
        self.entries.iter().filter(|r| r.rewritten).count()
    }
}

pub fn digest(content: &[u8]) -> String {
    hex::encode(blake3::hash(content).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_hex_blake3() {
        let d = digest(b"abc");
        assert_eq!(d.len(), 64);
        assert_eq!(d, blake3::hash(b"abc").to_hex().to_string());
    }
}
