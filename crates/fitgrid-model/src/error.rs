use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("subject id must not be empty")]
    EmptySubjectId,
}

pub type Result<T> = std::result::Result<T, ModelError>;
