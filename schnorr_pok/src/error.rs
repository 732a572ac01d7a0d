use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchnorrError {
    #[error("expected sequences of the same size but got {0} and {1}")]
    ExpectedSameSizeSequences(usize, usize),
    #[error("statement has no group elements")]
    EmptyStatement,
    #[error("proof does not verify")]
    InvalidProof,
}
