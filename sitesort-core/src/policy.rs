use serde::{Deserialize, Serialize};

use crate::error::{ArchiveError, Result};

/// Limits checked while reading the input archive. `None` means unbounded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Maximum number of entries, directories included.
    pub max_entries: Option<u64>,
    /// Maximum sum of uncompressed entry sizes in bytes.
    pub max_uncompressed: Option<u64>,
}

impl Policy {
    pub fn check_entries(&self, count: u64) -> Result<()> {
        match self.max_entries {
            Some(max) if count > max => Err(ArchiveError::Policy(format!(
                "archive has {count} entries, limit is {max}"
            ))),
            _ => Ok(()),
        }
    }

    pub fn check_uncompressed(&self, total: u64) -> Result<()> {
        match self.max_uncompressed {
            Some(max) if total > max => Err(ArchiveError::Policy(format!(
                "archive expands to more than {max} bytes"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_by_default() {
        let p = Policy::default();
        assert!(p.check_entries(u64::MAX).is_ok());
        assert!(p.check_uncompressed(u64::MAX).is_ok());
    }

    #[test]
    fn limits_are_inclusive() {
        let p = Policy {
            max_entries: Some(3),
            max_uncompressed: Some(10),
        };
        assert!(p.check_entries(3).is_ok());
        assert!(matches!(p.check_entries(4), Err(ArchiveError::Policy(_))));
        assert!(p.check_uncompressed(10).is_ok());
        assert!(matches!(
            p.check_uncompressed(11),
            Err(ArchiveError::Policy(_))
        ));
    }
}
