use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Fuel capacity must be a positive finite number, got {0}")]
    InvalidFuelCapacity(f64),

    #[error("Invalid renderer config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
