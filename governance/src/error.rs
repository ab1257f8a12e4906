use curia_content::ContentError;
use curia_oracle::OracleError;
use curia_types::{ContentId, ProposalId, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("insufficient tokens to propose: have {have}, need {need}")]
    InsufficientTokens { have: TokenAmount, need: TokenAmount },

    #[error("content {0} is not flagged")]
    ContentNotFlagged(ContentId),

    #[error("content {content_id} already has open proposal {proposal_id}")]
    ProposalAlreadyOpen {
        content_id: ContentId,
        proposal_id: ProposalId,
    },

    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    #[error("voting has not started yet")]
    VotingNotStarted,

    #[error("voting window has closed")]
    VotingEnded,

    #[error("voter has already voted on this proposal")]
    AlreadyVoted,

    #[error("voting window has not ended yet")]
    VotingNotEnded,

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("quorum not reached: {have} < {need}")]
    QuorumNotReached { have: TokenAmount, need: TokenAmount },

    #[error("quorum {bps} bps outside allowed range {min}..={max}")]
    QuorumOutOfBounds { bps: u32, min: u32, max: u32 },

    #[error("only the system owner may tune governance parameters")]
    Unauthorized,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Content(#[from] ContentError),
}
