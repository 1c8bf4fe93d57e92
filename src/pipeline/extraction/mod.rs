pub mod types;
pub mod classify;
pub mod cascade;
pub mod normalize;
pub mod vocabulary;
pub mod range;
pub mod dedup;
pub mod metadata;
pub mod orchestrator;

pub use types::*;
pub use classify::*;
pub use cascade::*;
pub use normalize::*;
pub use vocabulary::*;
pub use range::*;
pub use dedup::*;
pub use metadata::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text encoding error: {0}")]
    EncodingError(String),

    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Document contains no text")]
    EmptyDocument,
}
