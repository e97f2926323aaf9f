use std::io;
use std::path::PathBuf;

use har_core::{ActivityId, ActivityMapError};
use thiserror::Error;

use crate::dataset::Split;

/// Errors produced while reading or assembling the dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("{path}:{line}: expected {expected} columns, found {found}")]
    ColumnCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{path}:{line}: row has {found} values but earlier rows have {expected}")]
    RaggedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{names} feature names for a matrix with {columns} columns")]
    ColumnNames { names: usize, columns: usize },
    #[error("{split} split has {features} feature rows but {labels} labels")]
    RowCountMismatch {
        split: Split,
        features: usize,
        labels: usize,
    },
    #[error("{path}:{line}: activity id {id} is not in the activity map")]
    UnknownActivity {
        path: PathBuf,
        line: usize,
        id: ActivityId,
    },
    #[error("invalid activity map in {path}: {source}")]
    ActivityMap {
        path: PathBuf,
        #[source]
        source: ActivityMapError,
    },
    #[error("{path} contains no data rows")]
    Empty { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
