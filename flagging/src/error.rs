use curia_content::ContentError;
use curia_oracle::OracleError;
use curia_types::{ContentId, FlagId, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagError {
    #[error("content {0} not found")]
    ContentNotFound(ContentId),

    #[error("content {0} is archived and closed to governance")]
    ContentArchived(ContentId),

    #[error("insufficient tokens to flag: have {have}, need {need}")]
    InsufficientTokens { have: TokenAmount, need: TokenAmount },

    #[error("reporter has already flagged content {0}")]
    AlreadyFlagged(ContentId),

    #[error("authors cannot flag their own content")]
    CannotFlagOwnContent,

    #[error("flag {0} not found")]
    NotFound(FlagId),

    #[error("flag {0} is already resolved")]
    AlreadyResolved(FlagId),

    #[error("only the system owner may resolve flags")]
    Unauthorized,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Content(#[from] ContentError),
}
