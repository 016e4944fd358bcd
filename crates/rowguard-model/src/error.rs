use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowguardError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, RowguardError>;
