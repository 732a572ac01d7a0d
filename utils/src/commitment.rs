use crate::{
    affine_group_element_from_byte_slices, msm::WindowTable, serde_utils::ArkObjectBytes,
};
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, vec::Vec};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A Pedersen commitment key `(g, h)`. The Pedersen commitment will be `g * m + h * r` with opening `(m, r)`.
/// For the commitment to be binding, nobody may know the discrete log of `h` with respect to `g`.
#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct PedersenCommitmentKey<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g: G,
    #[serde_as(as = "ArkObjectBytes")]
    pub h: G,
}

impl<G: AffineRepr> PedersenCommitmentKey<G> {
    /// Create a new commitment key where both `g` and `h` are hashed from the label
    pub fn new<D: Digest>(label: &[u8]) -> Self {
        let g = affine_group_element_from_byte_slices!(label, b" : G");
        let h = affine_group_element_from_byte_slices!(label, b" : H");
        Self { g, h }
    }

    /// Create a new commitment key where `g` is the group's standard generator and `h` is hashed from the label
    pub fn new_with_generator<D: Digest>(label: &[u8]) -> Self {
        let h = affine_group_element_from_byte_slices!(label, b" : H");
        Self {
            g: G::generator(),
            h,
        }
    }

    /// Neither element is the identity and they differ
    pub fn is_valid(&self) -> bool {
        !self.g.is_zero() && !self.h.is_zero() && self.g != self.h
    }

    /// Commit to a message
    pub fn commit(&self, message: &G::ScalarField, randomness: &G::ScalarField) -> G {
        self.commit_as_projective(message, randomness).into()
    }

    /// Commit to a batch of messages and output commitments corresponding to each message. `messages`
    /// and `randomness` are paired up in order, any excess in the longer one is ignored.
    pub fn commit_to_a_batch(
        &self,
        messages: &[G::ScalarField],
        randomness: &[G::ScalarField],
    ) -> Vec<G> {
        let n = messages.len().min(randomness.len());
        let g_table = WindowTable::new(n, self.g.into_group());
        let h_table = WindowTable::new(n, self.h.into_group());
        G::Group::normalize_batch(
            &cfg_into_iter!(&messages[..n])
                .zip(cfg_into_iter!(&randomness[..n]))
                .map(|(m_i, r_i)| g_table.multiply(m_i) + h_table.multiply(r_i))
                .collect::<Vec<_>>(),
        )
    }

    pub fn commit_as_projective(
        &self,
        message: &G::ScalarField,
        randomness: &G::ScalarField,
    ) -> G::Group {
        self.g * message + self.h * randomness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{G1Affine, G2Affine};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use blake2::Blake2b512;

    #[test]
    fn commitment_key_and_batch_commitment() {
        let mut rng = StdRng::seed_from_u64(0u64);

        fn check<G: AffineRepr>(rng: &mut StdRng) {
            let key = PedersenCommitmentKey::<G>::new_with_generator::<Blake2b512>(b"test");
            assert!(key.is_valid());
            assert_eq!(key.g, G::generator());
            assert_eq!(
                key,
                PedersenCommitmentKey::<G>::new_with_generator::<Blake2b512>(b"test")
            );
            assert_ne!(
                key.h,
                PedersenCommitmentKey::<G>::new_with_generator::<Blake2b512>(b"test2").h
            );

            let key2 = PedersenCommitmentKey::<G>::new::<Blake2b512>(b"test");
            assert!(key2.is_valid());
            assert_eq!(key2.h, key.h);
            assert_ne!(key2.g, key.g);

            let bad = PedersenCommitmentKey { g: key.g, h: key.g };
            assert!(!bad.is_valid());

            let messages = (0..5)
                .map(|_| G::ScalarField::rand(rng))
                .collect::<Vec<_>>();
            let randomness = (0..5)
                .map(|_| G::ScalarField::rand(rng))
                .collect::<Vec<_>>();
            let comms = key.commit_to_a_batch(&messages, &randomness);
            assert_eq!(comms.len(), 5);
            for i in 0..5 {
                assert_eq!(comms[i], key.commit(&messages[i], &randomness[i]));
            }
            assert_eq!(key.commit_to_a_batch(&messages, &randomness[..3]).len(), 3);
        }

        check::<G1Affine>(&mut rng);
        check::<G2Affine>(&mut rng);
    }
}
