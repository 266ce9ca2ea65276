use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Events directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Event file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed event file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field `{field}` in event #{index} of {}", path.display())]
    MissingField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },

    #[error("Location of event #{index} in {} has {len} element(s), expected at least 2", path.display())]
    LocationTooShort {
        path: PathBuf,
        index: usize,
        len: usize,
    },

    #[error("Failed to write output {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExtractError {
    /// Map an `io::Error` raised while reading input into the matching variant.
    pub fn from_read(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => ExtractError::NotFound { path },
            io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied { path },
            _ => ExtractError::Io { path, source },
        }
    }

    /// 이벤트 파일 읽기 오류 매핑 (디렉터리 목록 이후 사라진 파일 포함)
    pub fn from_file_read(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ExtractError::FileNotFound { path: path.to_path_buf() },
            _ => ExtractError::from_read(path, source),
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        ExtractError::Write { path: path.to_path_buf(), source }
    }

    /// True when the input data is at fault rather than the environment.
    pub fn is_input_error(&self) -> bool {
        match self {
            ExtractError::Parse { .. } => true,
            ExtractError::MissingField { .. } => true,
            ExtractError::LocationTooShort { .. } => true,
            ExtractError::NotFound { .. } => false,
            ExtractError::FileNotFound { .. } => false,
            ExtractError::PermissionDenied { .. } => false,
            ExtractError::Io { .. } => false,
            ExtractError::Write { .. } => false,
        }
    }

    /// Shot-level field errors, the only ones the skip policy may drop.
    pub fn is_shot_field_error(&self) -> bool {
        matches!(
            self,
            ExtractError::MissingField { .. } | ExtractError::LocationTooShort { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
