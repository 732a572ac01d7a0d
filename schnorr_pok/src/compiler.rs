//! Fiat-Shamir transform of the Schnorr protocols in this crate.
//!
//! The challenge is derived from a transcript that, before the protocol's own challenge contribution, has absorbed a
//! domain separator, a session id and the prover's id. A proof created for one session (or by one prover) thus fails to
//! verify for any other, which stops replaying another party's proof as one's own.

use crate::{
    batch_discrete_log::{PokBatchDiscreteLog, PokBatchDiscreteLogProtocol},
    error::SchnorrError,
};
use ark_ec::AffineRepr;
use ark_std::{rand::RngCore, vec::Vec, UniformRand};
use dkg_utils::transcript::Transcript;

pub const NIZK_DOMAIN_SEPARATOR: &[u8] = b"schnorr-pok-fiat-shamir";
pub const CHALLENGE_LABEL: &[u8] = b"challenge";

/// Makes an interactive Schnorr protocol non-interactive. Consumes a transcript, usually a fork of a protocol's
/// transcript, so the prover and each verifier must start from transcripts with the same history.
#[derive(Clone)]
pub struct FiatShamir<T: Transcript> {
    transcript: T,
}

impl<T: Transcript> FiatShamir<T> {
    pub fn new(mut transcript: T, session_id: &[u8], prover_id: &[u8]) -> Self {
        transcript.append_domain_separator(NIZK_DOMAIN_SEPARATOR);
        transcript.append_message(b"session_id", session_id);
        transcript.append_message(b"prover_id", prover_id);
        Self { transcript }
    }

    /// Prove knowledge of `witnesses` such that `statement[i] = base * witnesses[i]`
    pub fn prove_batch_discrete_log<R: RngCore, G: AffineRepr>(
        mut self,
        rng: &mut R,
        base: &G,
        statement: &[G],
        witnesses: Vec<G::ScalarField>,
    ) -> Result<PokBatchDiscreteLog<G>, SchnorrError> {
        if statement.len() != witnesses.len() {
            return Err(SchnorrError::ExpectedSameSizeSequences(
                statement.len(),
                witnesses.len(),
            ));
        }
        let protocol =
            PokBatchDiscreteLogProtocol::init(witnesses, G::ScalarField::rand(rng), base)?;
        protocol.challenge_contribution(base, statement, &mut self.transcript);
        let challenge = self
            .transcript
            .challenge_scalar::<G::ScalarField>(CHALLENGE_LABEL);
        Ok(protocol.gen_proof(&challenge))
    }

    pub fn verify_batch_discrete_log<G: AffineRepr>(
        mut self,
        base: &G,
        statement: &[G],
        proof: &PokBatchDiscreteLog<G>,
    ) -> Result<(), SchnorrError> {
        if statement.is_empty() {
            return Err(SchnorrError::EmptyStatement);
        }
        proof.challenge_contribution(base, statement, &mut self.transcript);
        let challenge = self
            .transcript
            .challenge_scalar::<G::ScalarField>(CHALLENGE_LABEL);
        proof.verify(statement, base, &challenge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;
    use ark_ff::One;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use dkg_utils::transcript::new_merlin_transcript;
    use test_utils::{G1, G2};

    #[test]
    fn proof_bound_to_session_and_prover() {
        let mut rng = StdRng::seed_from_u64(0u64);

        fn check<G: AffineRepr>(rng: &mut StdRng) {
            let base = G::generator();
            let mut session_transcript = new_merlin_transcript(b"test");
            session_transcript.append_message(b"context", b"some public parameters");

            let witnesses = (0..4)
                .map(|_| G::ScalarField::rand(rng))
                .collect::<Vec<_>>();
            let statement = G::Group::normalize_batch(
                &witnesses.iter().map(|w| base * w).collect::<Vec<_>>(),
            );

            let proof = FiatShamir::new(session_transcript.clone(), b"session-1", &1u16.to_le_bytes())
                .prove_batch_discrete_log(rng, &base, &statement, witnesses.clone())
                .unwrap();

            FiatShamir::new(session_transcript.clone(), b"session-1", &1u16.to_le_bytes())
                .verify_batch_discrete_log(&base, &statement, &proof)
                .unwrap();

            // Another session
            assert!(
                FiatShamir::new(session_transcript.clone(), b"session-2", &1u16.to_le_bytes())
                    .verify_batch_discrete_log(&base, &statement, &proof)
                    .is_err()
            );

            // Another prover
            assert!(
                FiatShamir::new(session_transcript.clone(), b"session-1", &2u16.to_le_bytes())
                    .verify_batch_discrete_log(&base, &statement, &proof)
                    .is_err()
            );

            // Different transcript history
            assert!(
                FiatShamir::new(new_merlin_transcript(b"test"), b"session-1", &1u16.to_le_bytes())
                    .verify_batch_discrete_log(&base, &statement, &proof)
                    .is_err()
            );

            // Different statement
            let mut wrong_statement = statement.clone();
            wrong_statement[0] = G::generator();
            assert!(
                FiatShamir::new(session_transcript.clone(), b"session-1", &1u16.to_le_bytes())
                    .verify_batch_discrete_log(&base, &wrong_statement, &proof)
                    .is_err()
            );

            // Tampered response
            let mut wrong_proof = proof.clone();
            wrong_proof.response += G::ScalarField::one();
            assert!(
                FiatShamir::new(session_transcript.clone(), b"session-1", &1u16.to_le_bytes())
                    .verify_batch_discrete_log(&base, &statement, &wrong_proof)
                    .is_err()
            );

            // Statement and witnesses must have the same size
            assert!(matches!(
                FiatShamir::new(session_transcript.clone(), b"session-1", &1u16.to_le_bytes())
                    .prove_batch_discrete_log(rng, &base, &statement[..3], witnesses.clone()),
                Err(SchnorrError::ExpectedSameSizeSequences(3, 4))
            ));
            assert!(matches!(
                FiatShamir::new(session_transcript.clone(), b"session-1", &1u16.to_le_bytes())
                    .verify_batch_discrete_log(&base, &[], &proof),
                Err(SchnorrError::EmptyStatement)
            ));
        }

        check::<G1>(&mut rng);
        check::<G2>(&mut rng);
    }
}
