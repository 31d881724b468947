use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Could not read source file: {0}")]
    Read(String),

    #[error("Could not find data start row in source file")]
    NoDataRegion,

    #[error("Could not write destination file: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("A conversion is already running")]
    Busy,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
