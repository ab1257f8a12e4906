use curia_content::ContentError;
use curia_oracle::OracleError;
use curia_types::{AppealId, ContentId, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppealError {
    #[error("insufficient tokens to appeal: have {have}, need {need}")]
    InsufficientTokens { have: TokenAmount, need: TokenAmount },

    #[error("content {0} is not removed")]
    ContentNotRemoved(ContentId),

    #[error("only the content's author may appeal")]
    NotContentAuthor,

    #[error("content {content_id} already has appeal {appeal_id}")]
    AppealAlreadyExists {
        content_id: ContentId,
        appeal_id: AppealId,
    },

    #[error("appeal {0} not found")]
    NotFound(AppealId),

    #[error("voting has not started yet")]
    VotingNotStarted,

    #[error("voting window has closed")]
    VotingEnded,

    #[error("voter has already voted on this appeal")]
    AlreadyVoted,

    #[error("voting window has not ended yet")]
    VotingNotEnded,

    #[error("appeal {0} has already been resolved")]
    AlreadyResolved(AppealId),

    #[error("quorum not reached: {have} < {need}")]
    QuorumNotReached { have: TokenAmount, need: TokenAmount },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Content(#[from] ContentError),
}
