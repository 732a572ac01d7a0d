use ark_ec::AffineRepr;
use ark_serialize::CanonicalSerialize;
use ark_std::collections::BTreeMap;
use dkg_utils::serde_utils::ArkObjectBytes;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Same};

use crate::{
    access_structure::ThresholdAccessStructure,
    common::{ParticipantId, Share, VerificationVector},
    error::SSError,
    feldman_vss,
};

/// Result of a successful DKG for one participant. All honest participants of a session get the same verification
/// vector, public key and partial public keys, and each gets its own share.
/// Deserialization, with arkworks or serde, checks that the share, public key and partial public keys agree with
/// the verification vector and the access structure.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, Serialize, Deserialize)]
#[serde(bound = "", try_from = "RawDkgOutput<G>")]
pub struct DkgOutput<G: AffineRepr> {
    pub(crate) share: Share<G::ScalarField>,
    pub(crate) verification_vector: VerificationVector<G>,
    #[serde_as(as = "ArkObjectBytes")]
    pub(crate) public_key: G,
    #[serde_as(as = "BTreeMap<Same, ArkObjectBytes>")]
    pub(crate) partial_public_keys: BTreeMap<ParticipantId, G>,
    pub(crate) access_structure: ThresholdAccessStructure,
}

/// Unvalidated form used during deserialization
#[serde_as]
#[derive(Deserialize)]
#[serde(bound = "")]
struct RawDkgOutput<G: AffineRepr> {
    share: Share<G::ScalarField>,
    verification_vector: VerificationVector<G>,
    #[serde_as(as = "ArkObjectBytes")]
    public_key: G,
    #[serde_as(as = "BTreeMap<Same, ArkObjectBytes>")]
    partial_public_keys: BTreeMap<ParticipantId, G>,
    access_structure: ThresholdAccessStructure,
}

impl<G: AffineRepr> DkgOutput<G> {
    /// This participant's share of the secret key
    pub fn share(&self) -> &Share<G::ScalarField> {
        &self.share
    }

    /// Sum of the Feldman verification vectors of all participants
    pub fn verification_vector(&self) -> &VerificationVector<G> {
        &self.verification_vector
    }

    /// `g*secret`, the evaluation of the verification vector at 0
    pub fn public_key(&self) -> &G {
        &self.public_key
    }

    /// `g*share_j` for each shareholder `j`, the evaluation of the verification vector at `j`
    pub fn partial_public_keys(&self) -> &BTreeMap<ParticipantId, G> {
        &self.partial_public_keys
    }

    pub fn partial_public_key(&self, id: ParticipantId) -> Option<&G> {
        self.partial_public_keys.get(&id)
    }

    pub fn access_structure(&self) -> &ThresholdAccessStructure {
        &self.access_structure
    }

    /// Recompute the public key from the partial public keys of the shareholders in `ids`, which must be an
    /// authorized set
    pub fn public_key_from_partial_keys(&self, ids: &[ParticipantId]) -> Result<G, SSError> {
        let mut subset = BTreeMap::new();
        for id in ids {
            let pk = self
                .partial_public_keys
                .get(id)
                .ok_or(SSError::NotAShareholder(*id))?;
            subset.insert(*id, *pk);
        }
        feldman_vss::reconstruct_threshold_public_key(&self.access_structure, &subset)
    }

    /// The verification vector is for the access structure's threshold, the share belongs to a shareholder and
    /// has that threshold, the public key is the vector evaluated at 0 and there is exactly one partial public key
    /// per shareholder, the vector evaluated at its id
    pub fn check_consistency(&self) -> Result<(), SSError> {
        let threshold = self.access_structure.threshold();
        if !self.verification_vector.supports_threshold(threshold) {
            return Err(SSError::DoesNotSupportThreshold(threshold));
        }
        if !self.access_structure.is_shareholder(self.share.id) {
            return Err(SSError::NotAShareholder(self.share.id));
        }
        if self.share.threshold != threshold {
            return Err(SSError::UnequalThresholdInReceivedShare(
                threshold,
                self.share.threshold,
            ));
        }
        if self.public_key != self.verification_vector.commitment_to_secret() {
            return Err(SSError::InconsistentOutput(
                "public key is not the verification vector at 0",
            ));
        }
        if !self
            .partial_public_keys
            .keys()
            .eq(self.access_structure.shareholders().iter())
        {
            return Err(SSError::InconsistentOutput(
                "partial public keys are not for the shareholders",
            ));
        }
        for (id, pk) in &self.partial_public_keys {
            if *pk != self.verification_vector.evaluate_at(*id) {
                return Err(SSError::InconsistentOutput(
                    "partial public key is not the verification vector at the shareholder's id",
                ));
            }
        }
        Ok(())
    }
}

impl<G: AffineRepr> TryFrom<RawDkgOutput<G>> for DkgOutput<G> {
    type Error = SSError;

    fn try_from(raw: RawDkgOutput<G>) -> Result<Self, Self::Error> {
        let output = Self {
            share: raw.share,
            verification_vector: raw.verification_vector,
            public_key: raw.public_key,
            partial_public_keys: raw.partial_public_keys,
            access_structure: raw.access_structure,
        };
        output.check_consistency()?;
        Ok(output)
    }
}

mod serialization {
    use super::*;
    use ark_serialize::{
        CanonicalDeserialize, Compress, SerializationError, Valid, Validate,
    };
    use ark_std::io::Read;

    impl<G: AffineRepr> Valid for DkgOutput<G> {
        fn check(&self) -> Result<(), SerializationError> {
            self.check_consistency()
                .map_err(|_| SerializationError::InvalidData)
        }
    }

    impl<G: AffineRepr> CanonicalDeserialize for DkgOutput<G> {
        fn deserialize_with_mode<R: Read>(
            mut reader: R,
            compress: Compress,
            validate: Validate,
        ) -> Result<Self, SerializationError> {
            let output = Self {
                share: Share::deserialize_with_mode(&mut reader, compress, validate)?,
                verification_vector: VerificationVector::deserialize_with_mode(
                    &mut reader,
                    compress,
                    validate,
                )?,
                public_key: G::deserialize_with_mode(&mut reader, compress, validate)?,
                partial_public_keys: BTreeMap::deserialize_with_mode(
                    &mut reader,
                    compress,
                    validate,
                )?,
                access_structure: ThresholdAccessStructure::deserialize_with_mode(
                    &mut reader,
                    compress,
                    validate,
                )?,
            };
            if let Validate::Yes = validate {
                output.check()?;
            }
            Ok(output)
        }
    }
}
