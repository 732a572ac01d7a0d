use crate::{
    common::{ParticipantId, ShareId},
    gennaro::Round,
};
use schnorr_pok::error::SchnorrError;
use thiserror::Error;

/// Errors from secret sharing, share and proof verification
#[derive(Debug, Error)]
pub enum SSError {
    #[error("invalid threshold {0} for {1} shareholders")]
    InvalidThresholdOrTotal(ShareId, ShareId),
    #[error("need at least {0} shares but got {1}")]
    BelowThreshold(ShareId, ShareId),
    #[error("set of shareholders is not authorized")]
    UnauthorizedSet,
    #[error("shareholder id {0} is invalid")]
    InvalidShareholderId(ShareId),
    #[error("shareholder id {0} is repeated")]
    DuplicateShareholderId(ShareId),
    #[error("{0} is not a shareholder")]
    NotAShareholder(ParticipantId),
    #[error("share does not match the Pedersen verification vector")]
    InvalidShare,
    #[error("share does not match the Feldman verification vector")]
    InvalidFeldmanShare,
    #[error("expected threshold {0} but share has threshold {1}")]
    UnequalThresholdInReceivedShare(ShareId, ShareId),
    #[error("share for {1} was sent to {0}")]
    UnequalParticipantAndShareId(ParticipantId, ShareId),
    #[error("verification vector does not support threshold {0}")]
    DoesNotSupportThreshold(ShareId),
    #[error("verification vectors of different lengths {0} and {1}")]
    UnequalVerificationVectorLength(usize, usize),
    #[error("invalid proof of knowledge of the polynomial: {0}")]
    InvalidProofOfPolynomialKnowledge(SchnorrError),
    #[error("invalid proof of knowledge of the blinding polynomial: {0}")]
    InvalidProofOfBlindingKnowledge(SchnorrError),
    #[error("inconsistent DKG output: {0}")]
    InconsistentOutput(&'static str),
    #[error("session id is empty")]
    EmptySessionId,
    #[error("commitment key must have two distinct non-identity elements")]
    InvalidCommitmentKey,
}

/// Errors returned by a participant of the DKG
#[derive(Debug, Error)]
pub enum DkgError {
    /// Malformed local input, never caused by another participant
    #[error("invalid argument: {0}")]
    InvalidArgument(SSError),
    /// A round was called out of order
    #[error("expected round {expected:?}, got {actual:?}")]
    RoundMismatch { expected: Round, actual: Round },
    /// `culprit` sent a message that failed verification
    #[error("participant {culprit} deviated from the protocol: {cause}")]
    IdentifiableAbort {
        culprit: ParticipantId,
        cause: SSError,
    },
    #[error("no message received from participant {0}")]
    MissingMessage(ParticipantId),
    #[error("received a message from unexpected participant {0}")]
    UnexpectedSender(ParticipantId),
    /// The participant's own outputs disagree with each other. Indicates a bug, not a malicious participant.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(&'static str),
}

impl DkgError {
    /// The participant that deviated from the protocol, if this is an identifiable abort
    pub fn culprit(&self) -> Option<ParticipantId> {
        match self {
            Self::IdentifiableAbort { culprit, .. } => Some(*culprit),
            _ => None,
        }
    }

    pub fn is_identifiable_abort(&self) -> bool {
        matches!(self, Self::IdentifiableAbort { .. })
    }

    pub(crate) fn abort(culprit: ParticipantId, cause: SSError) -> Self {
        Self::IdentifiableAbort { culprit, cause }
    }
}

impl From<SSError> for DkgError {
    fn from(e: SSError) -> Self {
        Self::InvalidArgument(e)
    }
}
