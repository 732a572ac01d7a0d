//! Pedersen Verifiable secret sharing. Based on the paper "Non-interactive and information-theoretic secure verifiable secret sharing", section 4. <https://www.cs.cornell.edu/courses/cs754/2001fa/129.PDF>.
//! The basic idea is the following
//! - Dealer wants to share a secret `s` with the shareholders of a `t-of-n` access structure
//! - Create polynomial `F(x) = s + F_1.x + F_2.x^2 + ... F_{t-1}.x^{t-1}` such that `F(0) = s`.
//! - Create a random blinding polynomial `G(x) = b + G_1.x + G_2.x^2 + ... G_{t-1}.x^{t-1}` of the same degree.
//! - Commits to coefficients as `C_0 = C(s, b), C_1 = C(F_1, G_1), ..., C_{t-1} = C(F_{t-1}, G_{t-1})` where
//!   `C(m, r) = g*m + h*r` and broadcasts them to all participants as the verification vector
//! - Dealer sends `(F(i), G(i))` to participant `i`
//! - Each participant verifies `C(F(i), G(i)) = C_0 + C_1*i + C_2*{i^2} + ... C_{t-1}*{i^{t-1}}`
//!
//! The verification vector hides the secret perfectly. It binds the dealer as long as nobody knows the discrete
//! log of `h` with respect to `g`.

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use ark_poly::univariate::DensePolynomial;
use ark_std::{cfg_into_iter, rand::RngCore, vec::Vec, UniformRand};

use dkg_utils::commitment::PedersenCommitmentKey;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    access_structure::ThresholdAccessStructure,
    common::{coefficients, Share, Shares, VerifiableShare, VerifiableShares, VerificationVector},
    error::SSError,
    shamir_ss,
};

/// Generate a random secret with its shares according to Pedersen's verifiable secret sharing.
/// At least `threshold` number of shares are needed to reconstruct the secret.
/// Returns the secret, blinding, shares, Pedersen commitments to coefficients of the polynomials for
/// the secret and blinding and the polynomials
pub fn deal_random_secret<R: RngCore, G: AffineRepr>(
    rng: &mut R,
    access_structure: &ThresholdAccessStructure,
    comm_key: &PedersenCommitmentKey<G>,
) -> (
    G::ScalarField,
    G::ScalarField,
    VerifiableShares<G::ScalarField>,
    VerificationVector<G>,
    DensePolynomial<G::ScalarField>,
    DensePolynomial<G::ScalarField>,
) {
    let secret = G::ScalarField::rand(rng);
    let (t, shares, vv, s_poly, t_poly) = deal_secret(rng, secret, access_structure, comm_key);
    (secret, t, shares, vv, s_poly, t_poly)
}

/// Same as `deal_random_secret` above but accepts the secret to share
pub fn deal_secret<R: RngCore, G: AffineRepr>(
    rng: &mut R,
    secret: G::ScalarField,
    access_structure: &ThresholdAccessStructure,
    comm_key: &PedersenCommitmentKey<G>,
) -> (
    G::ScalarField,
    VerifiableShares<G::ScalarField>,
    VerificationVector<G>,
    DensePolynomial<G::ScalarField>,
    DensePolynomial<G::ScalarField>,
) {
    let threshold = access_structure.threshold();
    // Shares of the secret
    let (s_shares, s_poly) = shamir_ss::deal_secret(rng, secret, access_structure);
    // Create a random blinding and shares of that
    let (t, t_shares, t_poly) = shamir_ss::deal_random_secret(rng, access_structure);
    // Each commitment commits to a coefficient of `s_poly` with the blinding as the coefficient of `t_poly`
    let vv = comm_key.commit_to_a_batch(
        &coefficients(&s_poly, threshold),
        &coefficients(&t_poly, threshold),
    );

    (
        t,
        VerifiableShares(
            cfg_into_iter!(s_shares.0)
                .zip(cfg_into_iter!(t_shares.0))
                .map(|(s, t)| VerifiableShare {
                    id: s.id,
                    threshold,
                    secret_share: s.share,
                    blinding_share: t.share,
                })
                .collect(),
        ),
        vv.into(),
        s_poly,
        t_poly,
    )
}

impl<F: PrimeField> VerifiableShare<F> {
    /// Executed by each participant to verify its share received from the dealer.
    /// Also, should be called by the "reconstructor" to verify that each of the share being used in
    /// reconstruction is a valid share.
    pub fn verify<G: AffineRepr<ScalarField = F>>(
        &self,
        verification_vector: &VerificationVector<G>,
        comm_key: &PedersenCommitmentKey<G>,
    ) -> Result<(), SSError> {
        if self.id == 0 {
            return Err(SSError::InvalidShareholderId(self.id));
        }
        if !verification_vector.supports_threshold(self.threshold) {
            return Err(SSError::DoesNotSupportThreshold(self.threshold));
        }
        // V[0] + V[1]*id + V[2]*{id^2} + ... V[threshold-1]*{id^{threshold-1}} == g*share.s + h*share.t
        if verification_vector.evaluate_at(self.id)
            != comm_key.commit(&self.secret_share, &self.blinding_share)
        {
            return Err(SSError::InvalidShare);
        }
        Ok(())
    }
}

impl<F: PrimeField> VerifiableShares<F> {
    /// Reconstruct the secret and the blinding. The shares are assumed to be verified.
    pub fn reconstruct_secret(&self) -> Result<(F, F), SSError> {
        let mut s_shares = Vec::with_capacity(self.0.len());
        let mut t_shares = Vec::with_capacity(self.0.len());
        for share in &self.0 {
            s_shares.push(share.secret_part());
            t_shares.push(Share {
                id: share.id,
                threshold: share.threshold,
                share: share.blinding_share,
            });
        }
        let s = Shares(s_shares).reconstruct_secret()?;
        let t = Shares(t_shares).reconstruct_secret()?;

        Ok((s, t))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use ark_ff::One;
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use blake2::Blake2b512;
    use std::time::Instant;
    use test_utils::{test_serialization, G1, G2};

    #[test]
    fn pedersen_verifiable_secret_sharing() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let comm_key1 = PedersenCommitmentKey::<G1>::new_with_generator::<Blake2b512>(b"test");
        let comm_key2 = PedersenCommitmentKey::<G2>::new_with_generator::<Blake2b512>(b"test");

        fn check<G: AffineRepr>(rng: &mut StdRng, comm_key: &PedersenCommitmentKey<G>) {
            let mut checked_serialization = false;
            for (threshold, total) in vec![
                (1, 1),
                (1, 3),
                (2, 2),
                (2, 3),
                (2, 5),
                (3, 3),
                (3, 5),
                (4, 8),
                (5, 5),
                (5, 13),
                (7, 15),
            ] {
                println!("For {}-of-{} sharing", threshold, total);
                let a = ThresholdAccessStructure::new_ordinal(threshold, total).unwrap();
                let start = Instant::now();
                let (secret, blinding, shares, vv, _, _) =
                    deal_random_secret::<_, G>(rng, &a, comm_key);
                println!(
                    "Time to create shares and commitments {:?}",
                    start.elapsed()
                );
                assert_eq!(vv.len(), threshold as usize);
                assert_eq!(vv.commitment_to_secret(), comm_key.commit(&secret, &blinding));

                let mut noted_time = false;
                for share in &shares.0 {
                    // Wrong share fails to verify
                    let mut wrong_share = share.clone();
                    wrong_share.secret_share += G::ScalarField::one();
                    assert!(matches!(
                        wrong_share.verify(&vv, comm_key),
                        Err(SSError::InvalidShare)
                    ));

                    let mut wrong_share = share.clone();
                    wrong_share.blinding_share += G::ScalarField::one();
                    assert!(wrong_share.verify(&vv, comm_key).is_err());

                    // Share for another id fails to verify
                    let mut wrong_share = share.clone();
                    wrong_share.id = share.id % total + 1;
                    if total > 1 {
                        assert!(wrong_share.verify(&vv, comm_key).is_err());
                    }

                    // Correct share verifies
                    let start = Instant::now();
                    share.verify(&vv, comm_key).unwrap();
                    if !noted_time {
                        println!("Time to verify commitments is {:?}", start.elapsed());
                        noted_time = true;
                    }
                }

                let start = Instant::now();
                let (s, t) = shares.reconstruct_secret().unwrap();
                println!("Time to reconstruct secret {:?}", start.elapsed());
                assert_eq!(s, secret);
                assert_eq!(t, blinding);

                if !checked_serialization {
                    test_serialization!(VerifiableShares<G::ScalarField>, shares);
                    test_serialization!(VerifiableShare<G::ScalarField>, shares.0[0]);
                    test_serialization!(VerificationVector<G>, vv);
                    checked_serialization = true;
                }
            }
        }

        check(&mut rng, &comm_key1);
        check(&mut rng, &comm_key2);
    }

    #[test]
    fn share_and_vector_must_agree_on_threshold() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let comm_key = PedersenCommitmentKey::<G1>::new_with_generator::<Blake2b512>(b"test");
        let a = ThresholdAccessStructure::new_ordinal(3, 5).unwrap();
        let (_, _, shares, vv, _, _) = deal_random_secret::<_, G1>(&mut rng, &a, &comm_key);

        let mut share = shares.0[0].clone();
        share.threshold = 2;
        assert!(matches!(
            share.verify(&vv, &comm_key),
            Err(SSError::DoesNotSupportThreshold(2))
        ));

        let mut short_vv = vv.clone();
        short_vv.0.pop();
        assert!(shares.0[0].verify(&short_vv, &comm_key).is_err());

        let mut share = shares.0[0].clone();
        share.id = 0;
        assert!(matches!(
            share.verify(&vv, &comm_key),
            Err(SSError::InvalidShareholderId(0))
        ));

        // A share under another commitment key does not verify
        let other_key = PedersenCommitmentKey::<G1>::new_with_generator::<Blake2b512>(b"other");
        assert!(shares.0[0].verify(&vv, &other_key).is_err());
    }

    #[test]
    fn zero_secret_with_threshold_one() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let comm_key = PedersenCommitmentKey::<G1>::new_with_generator::<Blake2b512>(b"test");
        let a = ThresholdAccessStructure::new_ordinal(1, 3).unwrap();
        let secret = <G1 as AffineRepr>::ScalarField::from(0u64);
        let (_, shares, vv, _, _) = deal_secret(&mut rng, secret, &a, &comm_key);
        assert!(vv.supports_threshold(1));
        for share in &shares.0 {
            share.verify(&vv, &comm_key).unwrap();
        }
    }
}
