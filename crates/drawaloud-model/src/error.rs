use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("prompt id must not be blank (position {position})")]
    BlankPromptId { position: usize },
    #[error("duplicate prompt id: {id}")]
    DuplicatePromptId { id: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
