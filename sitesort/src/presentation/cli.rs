use clap::{Parser, Subcommand, ValueEnum};
use sitesort_core::Codec;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Sort a website archive into css/, img/, js/, fonts/ and video/", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Html,
    Css,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reorganize a .zip (or an unpacked site directory) into a new archive
    Reorganize {
        /// input .zip file or site directory
        input: PathBuf,

        #[arg(long, default_value = "organized_site.zip")]
        out: PathBuf,

        /// fixed entry timestamps for reproducible output
        #[arg(long)]
        deterministic: bool,

        /// compression for output entries: store, deflate or zstd
        #[arg(long)]
        codec: Option<Codec>,

        /// password for encrypted input entries
        #[arg(long)]
        password: Option<String>,

        /// refuse archives with more entries than this
        #[arg(long)]
        max_entries: Option<u64>,

        /// refuse archives expanding to more bytes than this
        #[arg(long = "max-bytes")]
        max_uncompressed: Option<u64>,

        /// TOML file with defaults for the options above
        #[arg(long)]
        config: Option<PathBuf>,

        /// print the JSON report to stdout
        #[arg(long)]
        report: bool,
    },

    /// Show where every file would go, without writing anything
    Plan {
        /// input .zip file or site directory
        input: PathBuf,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List archive contents
    List { archive: PathBuf },

    /// Rewrite references in one HTML or CSS file and print the result
    Rewrite {
        file: PathBuf,

        /// defaults to the file extension
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },
}
