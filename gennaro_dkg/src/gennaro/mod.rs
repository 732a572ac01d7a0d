//! Gennaro DKG from the paper [Secure Distributed Key Generation for Discrete-Log Based Cryptosystems](https://link.springer.com/content/pdf/10.1007/3-540-48910-X_21.pdf),
//! with each party also proving knowledge of its polynomial so no party can choose its contribution to the public
//! key after seeing the others' (rogue key).
//!
//! Each participant runs the following 3 rounds. Messages of a round are exchanged by the caller, all of them
//! must be delivered before the next round starts.
//! 1. Samples a random polynomial `a(x)` of degree `t-1` and Pedersen secret shares `a(0)` with blinding polynomial
//!    `b(x)`. Computes the Feldman commitments `g*a_k` to the coefficients, a proof of knowledge of
//!    `a_0, ..., a_{t-1}` and a proof of knowledge of `b_0, ..., b_{t-1}` w.r.t. `h`, both bound to the session id
//!    and its own id. Broadcasts the Pedersen verification vector `g*a_k + h*b_k`.
//! 2. Checks that every other participant sent a Pedersen verification vector for threshold `t`. Broadcasts its
//!    Feldman verification vector and both proofs, and sends to each participant `j` its share `(a(j), b(j))`.
//! 3. For each other participant `i`, checks the received share against `i`'s Pedersen verification vector, then
//!    against `i`'s Feldman verification vector, and verifies `i`'s proof for the Feldman vector. Then verifies
//!    `i`'s proof for the blinding polynomial against the difference of `i`'s Pedersen and Feldman vectors, which
//!    only holds if the Feldman vector commits to the same `a(x)` as the Pedersen one. Without it, when `t = n`
//!    the shares dealt to others do not fix `a_0` and `i` could pick its contribution to the public key after
//!    seeing everyone else's. The first failure aborts naming `i`.
//!    Otherwise the final share is the sum of all shares, the joint verification vector the sum of all Feldman
//!    verification vectors, the public key is its evaluation at 0 and the public key of each participant `j` its
//!    evaluation at `j`.
//!
//! The commitment key `(g, h)` is the same for all participants. The Feldman commitments and the public key use `g`.

pub mod messages;
pub mod output;
pub mod participant;
pub mod runner;

use ark_ec::AffineRepr;
use ark_std::vec::Vec;
use digest::Digest;
use dkg_utils::{commitment::PedersenCommitmentKey, transcript::Transcript};

use crate::{access_structure::ThresholdAccessStructure, error::SSError};

pub use messages::{Round1Broadcast, Round2Broadcast, Round2Unicast};
pub use output::DkgOutput;
pub use participant::Participant;

pub const DKG_DOMAIN_SEPARATOR: &[u8] = b"gennaro-dkg";

/// Rounds of the protocol in the order they must be run
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Round {
    One = 1,
    Two = 2,
    Three = 3,
    Done = 4,
}

/// Public parameters of a DKG session, the same for all participants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DkgParams<G: AffineRepr> {
    session_id: Vec<u8>,
    access_structure: ThresholdAccessStructure,
    comm_key: PedersenCommitmentKey<G>,
}

impl<G: AffineRepr> DkgParams<G> {
    /// The commitment key's `g` is the group's generator and `h` is hashed from `comm_key_label`
    pub fn new<D: Digest>(
        session_id: impl Into<Vec<u8>>,
        access_structure: ThresholdAccessStructure,
        comm_key_label: &[u8],
    ) -> Result<Self, SSError> {
        Self::with_commitment_key(
            session_id,
            access_structure,
            PedersenCommitmentKey::new_with_generator::<D>(comm_key_label),
        )
    }

    pub fn with_commitment_key(
        session_id: impl Into<Vec<u8>>,
        access_structure: ThresholdAccessStructure,
        comm_key: PedersenCommitmentKey<G>,
    ) -> Result<Self, SSError> {
        let session_id = session_id.into();
        if session_id.is_empty() {
            return Err(SSError::EmptySessionId);
        }
        if !comm_key.is_valid() {
            return Err(SSError::InvalidCommitmentKey);
        }
        Ok(Self {
            session_id,
            access_structure,
            comm_key,
        })
    }

    pub fn session_id(&self) -> &[u8] {
        &self.session_id
    }

    pub fn access_structure(&self) -> &ThresholdAccessStructure {
        &self.access_structure
    }

    pub fn comm_key(&self) -> &PedersenCommitmentKey<G> {
        &self.comm_key
    }

    /// Absorb everything participants must agree on before any proof is created
    pub(crate) fn bind_transcript<T: Transcript>(&self, transcript: &mut T) {
        transcript.append_domain_separator(DKG_DOMAIN_SEPARATOR);
        transcript.append_message(b"session_id", &self.session_id);
        transcript.append(b"threshold", &self.access_structure.threshold());
        for id in self.access_structure.shareholders() {
            transcript.append(b"shareholder", id);
        }
        transcript.append(b"comm_key_g", &self.comm_key.g);
        transcript.append(b"comm_key_h", &self.comm_key.h);
    }
}
