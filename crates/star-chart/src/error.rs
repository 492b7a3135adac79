use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not open chart viewer: {0}")]
    Open(String),

    #[error("Invalid chart options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
