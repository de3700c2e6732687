use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Chunker error: {0}")]
    ChunkerError(#[from] repochunk_code_chunker::ChunkerError),

    #[error("Invalid repository root: {0}")]
    InvalidRoot(String),

    #[error("{0}")]
    Other(String),
}
