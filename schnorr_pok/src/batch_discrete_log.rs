//! Schnorr protocol for proving knowledge of the discrete logs of several group elements w.r.t. the same base
//! with a single response.
//!
//! Given public `g` and `X_1 = g * w_1, X_2 = g * w_2, ..., X_k = g * w_k`, prove knowledge of all `w_i`:
//! 1. Prover chooses a random `r` and computes `t = g * r`
//! 2. Hashes `g`, all `X_i` and `t` towards getting a challenge `c`.
//! 3. Computes response `s = r + w_1*c + w_2*c^2 + ... + w_k*c^k` and sends `(t, s)` to the verifier.
//! 4. Verifier checks if `g * s = t + X_1*c + X_2*c^2 + ... + X_k*c^k`
//!
//! The response is the evaluation at `c` of the polynomial with coefficients `[r, w_1, ..., w_k]`, so `k + 1` accepting
//! transcripts with distinct challenges let an extractor interpolate all the `w_i`. When the `X_i` are the commitments
//! `g * a_i` to a polynomial's coefficients (a Feldman verification vector), this is a proof of knowledge of the polynomial.

use crate::error::SchnorrError;
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use dkg_utils::{ff::powers, serde_utils::ArkObjectBytes, transcript::Transcript};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Protocol for proving knowledge of discrete logs, i.e given public `X_i` and `g`, prove knowledge of each `w_i` in `g * w_i = X_i`
#[derive(Clone, PartialEq, Eq, Debug, Zeroize, ZeroizeOnDrop)]
pub struct PokBatchDiscreteLogProtocol<G: AffineRepr> {
    /// Commitment to randomness
    #[zeroize(skip)]
    pub t: G,
    /// Randomness chosen by the prover
    blinding: G::ScalarField,
    /// Prover's secrets `w_i`
    witnesses: Vec<G::ScalarField>,
}

/// Proof of knowledge of discrete logs
#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct PokBatchDiscreteLog<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBytes")]
    pub t: G,
    #[serde_as(as = "ArkObjectBytes")]
    pub response: G::ScalarField,
}

impl<G: AffineRepr> PokBatchDiscreteLogProtocol<G> {
    pub fn init(
        witnesses: Vec<G::ScalarField>,
        blinding: G::ScalarField,
        base: &G,
    ) -> Result<Self, SchnorrError> {
        if witnesses.is_empty() {
            return Err(SchnorrError::EmptyStatement);
        }
        let t = (*base * blinding).into_affine();
        Ok(Self {
            t,
            blinding,
            witnesses,
        })
    }

    pub fn challenge_contribution<T: Transcript>(
        &self,
        base: &G,
        statement: &[G],
        transcript: &mut T,
    ) {
        Self::compute_challenge_contribution(base, statement, &self.t, transcript)
    }

    /// `s = r + w_1*c + w_2*c^2 + ... + w_k*c^k`
    pub fn gen_proof(self, challenge: &G::ScalarField) -> PokBatchDiscreteLog<G> {
        let mut response = G::ScalarField::zero();
        for w in self.witnesses.iter().rev() {
            response += w;
            response *= challenge;
        }
        response += self.blinding;
        PokBatchDiscreteLog {
            t: self.t,
            response,
        }
    }

    pub fn compute_challenge_contribution<T: Transcript>(
        base: &G,
        statement: &[G],
        t: &G,
        transcript: &mut T,
    ) {
        transcript.append(b"base", base);
        transcript.append_message(b"statement_size", &(statement.len() as u64).to_le_bytes());
        for x in statement {
            transcript.append(b"statement", x);
        }
        transcript.append(b"t", t);
    }
}

impl<G: AffineRepr> PokBatchDiscreteLog<G> {
    pub fn challenge_contribution<T: Transcript>(
        &self,
        base: &G,
        statement: &[G],
        transcript: &mut T,
    ) {
        PokBatchDiscreteLogProtocol::compute_challenge_contribution(
            base, statement, &self.t, transcript,
        )
    }

    /// `t + X_1*c + X_2*c^2 + ... + X_k*c^k == g * s`
    pub fn verify(
        &self,
        statement: &[G],
        base: &G,
        challenge: &G::ScalarField,
    ) -> Result<(), SchnorrError> {
        if statement.is_empty() {
            return Err(SchnorrError::EmptyStatement);
        }
        let challenge_powers = powers(challenge, statement.len() + 1);
        let lhs =
            G::Group::msm_unchecked(statement, &challenge_powers[1..]) + self.t.into_group();
        if lhs != *base * self.response {
            return Err(SchnorrError::InvalidProof);
        }
        Ok(())
    }
}
