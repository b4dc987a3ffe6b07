use anyhow::{Context, Result};
use sitesort_core::{Codec, ReorgOptions};
use std::fs;
use std::path::Path;

/// Load options from a TOML file such as:
///
/// ```toml
/// deterministic = true
/// codec = "zstd"
///
/// [policy]
/// max_entries = 10000
/// max_uncompressed = 52428800
/// ```
///
/// Missing keys keep their defaults; no file means all defaults.
pub fn load_options(path: Option<&Path>) -> Result<ReorgOptions> {
    let Some(path) = path else {
        return Ok(ReorgOptions::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Command-line values that win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub deterministic: bool,
    pub codec: Option<Codec>,
    pub password: Option<String>,
    pub max_entries: Option<u64>,
    pub max_uncompressed: Option<u64>,
}

impl Overrides {
    pub fn apply(self, opts: &mut ReorgOptions) {
        opts.deterministic |= self.deterministic;
        if let Some(codec) = self.codec {
            opts.codec = codec;
        }
        if self.password.is_some() {
            opts.password = self.password;
        }
        if self.max_entries.is_some() {
            opts.policy.max_entries = self.max_entries;
        }
        if self.max_uncompressed.is_some() {
            opts.policy.max_uncompressed = self.max_uncompressed;
        }
    }
}
