//! Shamir secret sharing

use ark_ff::PrimeField;
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
use ark_std::{cfg_into_iter, cfg_iter, rand::RngCore, vec::Vec};

use crate::{
    access_structure::ThresholdAccessStructure,
    common,
    common::{ShareId, Shares},
    error::SSError,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Generate a random secret with its shares according to Shamir secret sharing, one share per shareholder of
/// the access structure. At least `threshold` number of shares are needed to reconstruct the secret.
/// Returns the secret, shares and the polynomial whose evaluations are the secret and the shares
pub fn deal_random_secret<R: RngCore, F: PrimeField>(
    rng: &mut R,
    access_structure: &ThresholdAccessStructure,
) -> (F, Shares<F>, DensePolynomial<F>) {
    let secret = F::rand(rng);
    let (shares, poly) = deal_secret(rng, secret, access_structure);
    (secret, shares, poly)
}

/// Same as `deal_random_secret` above but accepts the secret to share
pub fn deal_secret<R: RngCore, F: PrimeField>(
    rng: &mut R,
    secret: F,
    access_structure: &ThresholdAccessStructure,
) -> (Shares<F>, DensePolynomial<F>) {
    let threshold = access_structure.threshold();
    let mut coeffs = Vec::with_capacity(threshold as usize);
    coeffs.push(secret);
    coeffs.extend((1..threshold).map(|_| F::rand(rng)));
    let poly = DensePolynomial::from_coefficients_vec(coeffs);
    let ids = access_structure.shareholders().iter().copied().collect::<Vec<_>>();
    let shares = cfg_into_iter!(ids)
        .map(|i| (i, threshold, poly.evaluate(&F::from(i as u64))).into())
        .collect::<Vec<_>>();
    (Shares(shares), poly)
}

impl<F: PrimeField> Shares<F> {
    /// Reconstruct the secret from the first `threshold` shares. Share ids must be unique and non-zero and all
    /// shares must have the same threshold.
    pub fn reconstruct_secret(&self) -> Result<F, SSError> {
        let threshold = self.threshold();
        let len = self.0.len() as ShareId;
        if threshold < 1 {
            return Err(SSError::InvalidThresholdOrTotal(threshold, len));
        }
        if threshold > len {
            return Err(SSError::BelowThreshold(threshold, len));
        }
        if let Some(s) = self.0.iter().find(|s| s.threshold != threshold) {
            return Err(SSError::UnequalThresholdInReceivedShare(
                threshold,
                s.threshold,
            ));
        }
        let shares = &self.0[0..threshold as usize];
        let share_ids = shares.iter().map(|s| s.id).collect::<Vec<_>>();
        let basis = common::lagrange_basis_at_0_for_all::<F>(share_ids)?;
        Ok(cfg_into_iter!(basis)
            .zip(cfg_iter!(shares))
            .map(|(b, s)| b * s.share)
            .sum::<F>())
    }
}
