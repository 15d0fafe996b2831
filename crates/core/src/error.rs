use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("Shape is already in pixel space; the viewport may only be applied once")]
    AlreadyTransformed,

    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("Failed to read taxonomy from {}", path.display())]
    TaxonomyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid taxonomy: {0}")]
    TaxonomyParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TileError>;
