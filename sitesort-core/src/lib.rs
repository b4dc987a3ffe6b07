#![forbid(unsafe_code)]

pub mod classify;
pub mod domain;
pub mod error;
pub mod policy;
pub mod report;

pub mod util {
    pub mod path;
}

pub mod codec;

pub mod container {
    pub mod reader;
    pub mod writer;
}

pub mod pack {
    pub mod walker;
}

pub mod rewrite;

pub mod list;
pub mod pipeline;

// Re-exports: stable API surface
pub use classify::classify;
pub use codec::Codec;
pub use error::{ArchiveError, Result};
pub use list::{EntryRow, list};
pub use pipeline::{
    ReorgOptions, Reorganized, plan, plan_dir, reorganize, reorganize_dir, reorganize_with,
};
pub use policy::Policy;
pub use report::{ReorgReport, ReportRow};
pub use rewrite::{
    rewrite_markup, rewrite_markup_bytes, rewrite_stylesheet, rewrite_stylesheet_bytes,
};
