use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid source name `{name}`: expected a file name inside the data directory")]
    InvalidSource { name: String },

    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table in {source_name}: {source}")]
    Malformed {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("missing required column `{column}` in {source_name}")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("non-numeric value in column `{column}` of {source_name}, row {row}")]
    NonNumeric {
        source_name: String,
        column: &'static str,
        row: usize,
    },

    #[error("{source_name} has no student records")]
    Empty { source_name: String },
}

pub type LoadResult<T> = Result<T, LoadError>;
