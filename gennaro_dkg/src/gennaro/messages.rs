//! Messages exchanged between participants. Routing them is the caller's job, a participant never does any I/O.

use ark_ec::AffineRepr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use schnorr_pok::batch_discrete_log::PokBatchDiscreteLog;
use serde::{Deserialize, Serialize};

use crate::common::{VerifiableShare, VerificationVector};

/// Broadcast in round 1
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Round1Broadcast<G: AffineRepr> {
    /// Pedersen commitments `g*a_k + h*b_k` to the coefficients of the sender's polynomials
    pub pedersen_verification_vector: VerificationVector<G>,
}

/// Broadcast in round 2
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Round2Broadcast<G: AffineRepr> {
    /// Feldman commitments `g*a_k` to the coefficients of the sender's secret polynomial
    pub feldman_verification_vector: VerificationVector<G>,
    /// Proof of knowledge of the discrete logs of `feldman_verification_vector`
    pub proof: PokBatchDiscreteLog<G>,
    /// Proof of knowledge of the blinding coefficients `b_k` w.r.t. `h` of `P[k] - F[k]`, where `P` is the sender's
    /// Pedersen verification vector and `F` its Feldman verification vector. Ties `F` to the dealing committed in
    /// round 1.
    pub blinding_proof: PokBatchDiscreteLog<G>,
}

/// Sent in round 2 by the dealer to one other participant over a private channel
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Round2Unicast<G: AffineRepr> {
    pub pedersen_share: VerifiableShare<G::ScalarField>,
}
