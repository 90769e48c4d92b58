use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Malformed attribute token {token:?} at index {index}: expected name=value")]
    MalformedToken { token: String, index: usize },
}

pub type Result<T> = std::result::Result<T, AttributeError>;
