use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zip::CompressionMethod;

/// Compression applied to every entry of the output archive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    Store,
    #[default]
    Deflate,
    Zstd,
}

impl Codec {
    pub fn method(self) -> CompressionMethod {
        match self {
            Codec::Store => CompressionMethod::Stored,
            Codec::Deflate => CompressionMethod::Deflated,
            Codec::Zstd => CompressionMethod::Zstd,
        }
    }
}

impl FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "store" | "stored" => Ok(Codec::Store),
            "deflate" | "deflated" => Ok(Codec::Deflate),
            "zstd" => Ok(Codec::Zstd),
            other => Err(format!("unknown codec {other:?} (store, deflate, zstd)")),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Codec::Store => "store",
            Codec::Deflate => "deflate",
            Codec::Zstd => "zstd",
        })
    }
}
