use std::path::PathBuf;

/// Fatal catalog failures. These abort startup since no index can be built.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to open catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column {column:?}")]
    MissingColumn { column: &'static str },
}
