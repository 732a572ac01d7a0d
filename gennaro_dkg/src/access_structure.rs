//! Threshold access structure: any `threshold` of the shareholders are authorized, fewer are not.

use crate::{
    common::{ParticipantId, ShareId},
    error::SSError,
};
use ark_std::{collections::BTreeSet, vec::Vec};
use serde::{Deserialize, Serialize};

/// A `(t, n)` policy over a fixed set of shareholder ids. Ids are non-zero as the polynomial evaluated at 0 is
/// the secret, and `1 <= t <= n`. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholdAccessStructure")]
pub struct ThresholdAccessStructure {
    threshold: ShareId,
    shareholders: BTreeSet<ShareId>,
}

/// Unvalidated form used during deserialization
#[derive(Deserialize)]
struct RawThresholdAccessStructure {
    threshold: ShareId,
    shareholders: Vec<ShareId>,
}

impl ThresholdAccessStructure {
    pub fn new(
        threshold: ShareId,
        shareholders: impl IntoIterator<Item = ShareId>,
    ) -> Result<Self, SSError> {
        let mut set = BTreeSet::new();
        for id in shareholders {
            if id == 0 {
                return Err(SSError::InvalidShareholderId(id));
            }
            if !set.insert(id) {
                return Err(SSError::DuplicateShareholderId(id));
            }
        }
        let total = set.len() as ShareId;
        if threshold < 1 || threshold > total {
            return Err(SSError::InvalidThresholdOrTotal(threshold, total));
        }
        Ok(Self {
            threshold,
            shareholders: set,
        })
    }

    /// Shareholders with ids `1, 2, ..., total`
    pub fn new_ordinal(threshold: ShareId, total: ShareId) -> Result<Self, SSError> {
        Self::new(threshold, 1..=total)
    }

    pub fn threshold(&self) -> ShareId {
        self.threshold
    }

    pub fn total(&self) -> ShareId {
        self.shareholders.len() as ShareId
    }

    pub fn shareholders(&self) -> &BTreeSet<ShareId> {
        &self.shareholders
    }

    pub fn is_shareholder(&self, id: ShareId) -> bool {
        self.shareholders.contains(&id)
    }

    /// True iff all `ids` are shareholders and at least `threshold` of them are distinct. A repeated id
    /// is counted once.
    pub fn is_authorized(&self, ids: &[ShareId]) -> bool {
        let mut distinct = BTreeSet::new();
        for id in ids {
            if !self.is_shareholder(*id) {
                return false;
            }
            distinct.insert(*id);
        }
        distinct.len() >= self.threshold as usize
    }

    /// Shareholders other than `id`, in ascending order
    pub fn others(&self, id: ParticipantId) -> impl Iterator<Item = ParticipantId> + '_ {
        self.shareholders.iter().copied().filter(move |i| *i != id)
    }
}

impl TryFrom<RawThresholdAccessStructure> for ThresholdAccessStructure {
    type Error = SSError;

    fn try_from(raw: RawThresholdAccessStructure) -> Result<Self, Self::Error> {
        Self::new(raw.threshold, raw.shareholders)
    }
}

mod serialization {
    use super::*;
    use ark_serialize::{
        CanonicalDeserialize, CanonicalSerialize, Compress, SerializationError, Valid, Validate,
    };
    use ark_std::io::{Read, Write};

    impl Valid for ThresholdAccessStructure {
        fn check(&self) -> Result<(), SerializationError> {
            Self::new(self.threshold, self.shareholders.iter().copied())
                .map(|_| ())
                .map_err(|_| SerializationError::InvalidData)
        }
    }

    impl CanonicalSerialize for ThresholdAccessStructure {
        fn serialize_with_mode<W: Write>(
            &self,
            mut writer: W,
            compress: Compress,
        ) -> Result<(), SerializationError> {
            self.threshold.serialize_with_mode(&mut writer, compress)?;
            self.shareholders
                .iter()
                .copied()
                .collect::<Vec<_>>()
                .serialize_with_mode(&mut writer, compress)
        }

        fn serialized_size(&self, compress: Compress) -> usize {
            self.threshold.serialized_size(compress)
                + self
                    .shareholders
                    .iter()
                    .copied()
                    .collect::<Vec<_>>()
                    .serialized_size(compress)
        }
    }

    impl CanonicalDeserialize for ThresholdAccessStructure {
        fn deserialize_with_mode<R: Read>(
            mut reader: R,
            compress: Compress,
            validate: Validate,
        ) -> Result<Self, SerializationError> {
            let threshold = ShareId::deserialize_with_mode(&mut reader, compress, validate)?;
            let shareholders =
                Vec::<ShareId>::deserialize_with_mode(&mut reader, compress, validate)?;
            Self::new(threshold, shareholders).map_err(|_| SerializationError::InvalidData)
        }
    }
}
