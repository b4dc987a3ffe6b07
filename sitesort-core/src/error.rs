use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Password error: {0}")]
    Password(String),

    #[error("Policy violation: {0}")]
    Policy(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, ArchiveError>;
