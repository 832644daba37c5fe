use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog is missing required column: {0}")]
    MissingColumn(String),

    #[error("Catalog contains no usable schemes ({skipped} rows skipped)")]
    EmptyCatalog { skipped: usize },

    #[error("Empty vocabulary: no terms remain after pruning {documents} documents")]
    EmptyVocabulary { documents: usize },

    #[error("Index has {actual} rows for a catalog of {expected} schemes")]
    IndexMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
