use ark_ec::{AffineRepr, CurveGroup};
use ark_std::{boxed::Box, collections::BTreeMap, rand::RngCore, vec::Vec};
use schnorr_pok::{batch_discrete_log::PokBatchDiscreteLog, compiler::FiatShamir};
use tracing::{debug, error, instrument, warn};
use zeroize::Zeroize;

use dkg_utils::transcript::Transcript;

use super::{
    messages::{Round1Broadcast, Round2Broadcast, Round2Unicast},
    output::DkgOutput,
    DkgParams, Round,
};
use crate::{
    common::{coefficients, ParticipantId, Share, VerifiableShare, VerificationVector},
    error::{DkgError, SSError},
    feldman_vss, pedersen_vss,
};

const SECRET_POLYNOMIAL_PROOF: &[u8] = b"secret-polynomial";
const BLINDING_POLYNOMIAL_PROOF: &[u8] = b"blinding-polynomial";

/// What a participant keeps between rounds. Secret material is zeroized when the state is dropped or replaced.
enum State<G: AffineRepr> {
    Round1,
    Round2(Box<Round2State<G>>),
    Round3(Box<Round3State<G>>),
    Done,
}

struct Round2State<G: AffineRepr> {
    own_share: VerifiableShare<G::ScalarField>,
    outgoing_shares: BTreeMap<ParticipantId, VerifiableShare<G::ScalarField>>,
    feldman_verification_vector: VerificationVector<G>,
    proof: PokBatchDiscreteLog<G>,
    blinding_proof: PokBatchDiscreteLog<G>,
}

struct Round3State<G: AffineRepr> {
    own_share: Share<G::ScalarField>,
    feldman_verification_vector: VerificationVector<G>,
    /// Pedersen verification vectors received in round 1, by sender
    pedersen_verification_vectors: BTreeMap<ParticipantId, VerificationVector<G>>,
}

/// A participant of the DKG. Rounds must be called in order, each exactly once. A failed round leaves the
/// participant as it was before the call.
pub struct Participant<G: AffineRepr, R: RngCore, T: Transcript> {
    id: ParticipantId,
    params: DkgParams<G>,
    /// Bound to the session's parameters, forked for every proof
    transcript: T,
    rng: R,
    state: State<G>,
}

impl<G: AffineRepr, R: RngCore, T: Transcript> Participant<G, R, T> {
    /// All participants of a session must pass transcripts with the same history. `id` must be a shareholder.
    pub fn new(
        params: DkgParams<G>,
        id: ParticipantId,
        mut transcript: T,
        rng: R,
    ) -> Result<Self, DkgError> {
        if !params.access_structure().is_shareholder(id) {
            return Err(SSError::NotAShareholder(id).into());
        }
        params.bind_transcript(&mut transcript);
        Ok(Self {
            id,
            params,
            transcript,
            rng,
            state: State::Round1,
        })
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn params(&self) -> &DkgParams<G> {
        &self.params
    }

    /// The round to be called next, `Round::Done` after round 3 succeeded
    pub fn round(&self) -> Round {
        match self.state {
            State::Round1 => Round::One,
            State::Round2(_) => Round::Two,
            State::Round3(_) => Round::Three,
            State::Done => Round::Done,
        }
    }

    /// Sample the polynomials, deal the shares and prove knowledge of the secret polynomial. Returns the Pedersen
    /// verification vector to broadcast.
    #[instrument(level = "debug", skip_all, fields(participant = self.id))]
    pub fn round1(&mut self) -> Result<Round1Broadcast<G>, DkgError> {
        if !matches!(self.state, State::Round1) {
            return Err(self.round_mismatch(Round::One));
        }
        let access_structure = self.params.access_structure();
        let threshold = access_structure.threshold();
        let comm_key = self.params.comm_key();

        let (mut secret, mut blinding, shares, pedersen_verification_vector, mut s_poly, mut t_poly) =
            pedersen_vss::deal_random_secret::<_, G>(&mut self.rng, access_structure, comm_key);
        let coeffs = coefficients(&s_poly, threshold);
        let blinding_coeffs = coefficients(&t_poly, threshold);
        let feldman_verification_vector = feldman_vss::commit_to_poly(&coeffs, &comm_key.g);
        // `h*b_k`, which is `P[k] - F[k]` for the Pedersen vector `P` and the Feldman vector `F`
        let blinding_commitments = feldman_vss::commit_to_poly(&blinding_coeffs, &comm_key.h);
        let proof = self
            .fiat_shamir(self.id, SECRET_POLYNOMIAL_PROOF)
            .prove_batch_discrete_log(
                &mut self.rng,
                &comm_key.g,
                &feldman_verification_vector.0,
                coeffs,
            );
        let blinding_proof = self
            .fiat_shamir(self.id, BLINDING_POLYNOMIAL_PROOF)
            .prove_batch_discrete_log(
                &mut self.rng,
                &comm_key.h,
                &blinding_commitments.0,
                blinding_coeffs,
            );
        secret.zeroize();
        blinding.zeroize();
        s_poly.coeffs.zeroize();
        t_poly.coeffs.zeroize();
        let (proof, blinding_proof) = match (proof, blinding_proof) {
            (Ok(proof), Ok(blinding_proof)) => (proof, blinding_proof),
            _ => {
                error!("could not prove knowledge of own polynomials");
                return Err(DkgError::InternalInconsistency(
                    "proof of knowledge of own polynomials failed",
                ));
            }
        };

        let mut own_share = None;
        let mut outgoing_shares = BTreeMap::new();
        for share in shares.0 {
            if share.id == self.id {
                own_share = Some(share);
            } else {
                outgoing_shares.insert(share.id, share);
            }
        }
        let own_share = own_share.ok_or_else(|| {
            error!("no share dealt for self");
            DkgError::InternalInconsistency("no share dealt for self")
        })?;

        self.state = State::Round2(Box::new(Round2State {
            own_share,
            outgoing_shares,
            feldman_verification_vector,
            proof,
            blinding_proof,
        }));
        debug!(round = 1, "round complete");
        Ok(Round1Broadcast {
            pedersen_verification_vector,
        })
    }

    /// Record the Pedersen verification vector of every other participant. Returns the Feldman verification vector
    /// and proof to broadcast and the share to send to each other participant.
    #[instrument(level = "debug", skip_all, fields(participant = self.id))]
    pub fn round2(
        &mut self,
        broadcasts: &BTreeMap<ParticipantId, Round1Broadcast<G>>,
    ) -> Result<
        (
            Round2Broadcast<G>,
            BTreeMap<ParticipantId, Round2Unicast<G>>,
        ),
        DkgError,
    > {
        let state = match &self.state {
            State::Round2(state) => state,
            _ => return Err(self.round_mismatch(Round::Two)),
        };
        self.check_senders(broadcasts.keys())?;
        let threshold = self.params.access_structure().threshold();

        let mut pedersen_verification_vectors = BTreeMap::new();
        for sender in self.params.access_structure().others(self.id) {
            let msg = broadcasts
                .get(&sender)
                .ok_or(DkgError::MissingMessage(sender))?;
            let vv = &msg.pedersen_verification_vector;
            if !vv.supports_threshold(threshold) {
                return Err(self.abort(
                    Round::Two,
                    sender,
                    SSError::UnequalVerificationVectorLength(threshold as usize, vv.len()),
                ));
            }
            pedersen_verification_vectors.insert(sender, vv.clone());
        }

        let unicasts = state
            .outgoing_shares
            .iter()
            .map(|(id, share)| {
                (
                    *id,
                    Round2Unicast {
                        pedersen_share: share.clone(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();
        let broadcast = Round2Broadcast {
            feldman_verification_vector: state.feldman_verification_vector.clone(),
            proof: state.proof.clone(),
            blinding_proof: state.blinding_proof.clone(),
        };
        let next = Round3State {
            own_share: state.own_share.secret_part(),
            feldman_verification_vector: state.feldman_verification_vector.clone(),
            pedersen_verification_vectors,
        };

        self.state = State::Round3(Box::new(next));
        debug!(round = 2, "round complete");
        Ok((broadcast, unicasts))
    }

    /// Verify the share, Feldman verification vector and proof of every other participant and compute this
    /// participant's output. The first participant, in ascending order of id, whose messages fail verification
    /// is returned as the culprit of an identifiable abort.
    #[instrument(level = "debug", skip_all, fields(participant = self.id))]
    pub fn round3(
        &mut self,
        broadcasts: &BTreeMap<ParticipantId, Round2Broadcast<G>>,
        unicasts: &BTreeMap<ParticipantId, Round2Unicast<G>>,
    ) -> Result<DkgOutput<G>, DkgError> {
        let state = match &self.state {
            State::Round3(state) => state,
            _ => return Err(self.round_mismatch(Round::Three)),
        };
        self.check_senders(broadcasts.keys())?;
        self.check_senders(unicasts.keys())?;
        let access_structure = self.params.access_structure();
        let threshold = access_structure.threshold();
        let comm_key = self.params.comm_key();
        let g = &comm_key.g;

        let mut final_share = state.own_share.share;
        let mut feldman_verification_vectors = Vec::with_capacity(access_structure.total() as usize);
        feldman_verification_vectors.push(&state.feldman_verification_vector);
        for sender in access_structure.others(self.id) {
            let broadcast = broadcasts
                .get(&sender)
                .ok_or(DkgError::MissingMessage(sender))?;
            let unicast = unicasts
                .get(&sender)
                .ok_or(DkgError::MissingMessage(sender))?;
            let pedersen_verification_vector = state
                .pedersen_verification_vectors
                .get(&sender)
                .ok_or(DkgError::MissingMessage(sender))?;

            let share = &unicast.pedersen_share;
            if share.id != self.id {
                return Err(self.abort(
                    Round::Three,
                    sender,
                    SSError::UnequalParticipantAndShareId(self.id, share.id),
                ));
            }
            if share.threshold != threshold {
                return Err(self.abort(
                    Round::Three,
                    sender,
                    SSError::UnequalThresholdInReceivedShare(threshold, share.threshold),
                ));
            }
            share
                .verify(pedersen_verification_vector, comm_key)
                .map_err(|e| self.abort(Round::Three, sender, e))?;

            let feldman_verification_vector = &broadcast.feldman_verification_vector;
            share
                .secret_part()
                .verify(feldman_verification_vector, g)
                .map_err(|e| self.abort(Round::Three, sender, e))?;

            self.fiat_shamir(sender, SECRET_POLYNOMIAL_PROOF)
                .verify_batch_discrete_log(g, &feldman_verification_vector.0, &broadcast.proof)
                .map_err(|e| {
                    self.abort(
                        Round::Three,
                        sender,
                        SSError::InvalidProofOfPolynomialKnowledge(e),
                    )
                })?;

            // Both vectors have `threshold` elements, checked in round 2 and by the Feldman share check
            let blinding_commitments = G::Group::normalize_batch(
                &pedersen_verification_vector
                    .0
                    .iter()
                    .zip(feldman_verification_vector.0.iter())
                    .map(|(p, f)| p.into_group() - f.into_group())
                    .collect::<Vec<_>>(),
            );
            self.fiat_shamir(sender, BLINDING_POLYNOMIAL_PROOF)
                .verify_batch_discrete_log(
                    &comm_key.h,
                    &blinding_commitments,
                    &broadcast.blinding_proof,
                )
                .map_err(|e| {
                    self.abort(
                        Round::Three,
                        sender,
                        SSError::InvalidProofOfBlindingKnowledge(e),
                    )
                })?;

            final_share += share.secret_share;
            feldman_verification_vectors.push(feldman_verification_vector);
        }

        let verification_vector = VerificationVector::try_sum(feldman_verification_vectors)
            .map_err(|_| {
                error!("verified verification vectors have different lengths");
                DkgError::InternalInconsistency("verified verification vectors have different lengths")
            })?;
        let public_key = verification_vector.commitment_to_secret();
        let ids = access_structure.shareholders().iter().copied().collect::<Vec<_>>();
        let partial_public_keys = ids
            .iter()
            .copied()
            .zip(G::Group::normalize_batch(
                &ids.iter()
                    .map(|id| {
                        verification_vector.evaluate_as_projective(&G::ScalarField::from(*id as u64))
                    })
                    .collect::<Vec<_>>(),
            ))
            .collect::<BTreeMap<_, _>>();

        let share = Share {
            id: self.id,
            threshold,
            share: final_share,
        };
        final_share.zeroize();
        let expected = partial_public_keys.get(&self.id).copied().unwrap_or_else(G::zero);
        if (*g * share.share).into_affine() != expected {
            error!("partial public key does not match own share");
            return Err(DkgError::InternalInconsistency(
                "partial public key does not match own share",
            ));
        }

        let output = DkgOutput {
            share,
            verification_vector,
            public_key,
            partial_public_keys,
            access_structure: access_structure.clone(),
        };
        self.state = State::Done;
        debug!(round = 3, "round complete");
        Ok(output)
    }

    /// Fiat-Shamir for a proof by `prover`, on a fork of the session transcript separated by `statement`
    fn fiat_shamir(&self, prover: ParticipantId, statement: &'static [u8]) -> FiatShamir<T> {
        let mut transcript = self.transcript.clone();
        transcript.append_message(b"statement", statement);
        FiatShamir::new(
            transcript,
            self.params.session_id(),
            &prover.to_le_bytes(),
        )
    }

    fn round_mismatch(&self, expected: Round) -> DkgError {
        DkgError::RoundMismatch {
            expected,
            actual: self.round(),
        }
    }

    /// Every sender must be another shareholder
    fn check_senders<'a>(
        &self,
        senders: impl IntoIterator<Item = &'a ParticipantId>,
    ) -> Result<(), DkgError> {
        for sender in senders {
            if *sender == self.id || !self.params.access_structure().is_shareholder(*sender) {
                return Err(DkgError::UnexpectedSender(*sender));
            }
        }
        Ok(())
    }

    fn abort(&self, round: Round, culprit: ParticipantId, cause: SSError) -> DkgError {
        warn!(
            participant = self.id,
            round = round as u8,
            culprit,
            %cause,
            "identifiable abort"
        );
        DkgError::abort(culprit, cause)
    }
}
