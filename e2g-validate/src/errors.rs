use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
