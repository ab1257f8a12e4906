use curia_types::ContentId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("content with external id {0:?} already registered")]
    DuplicateContent(String),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("content {0} not found")]
    NotFound(ContentId),

    #[error("caller is not authorized to change content state")]
    Unauthorized,
}
