//! Feldman Verifiable Secret Sharing Scheme. Based on the paper [A practical scheme for non-interactive verifiable secret sharing](https://www.cs.umd.edu/~gasarch/TOPICS/secretsharing/feldmanVSS.pdf)
//!
//! The verification vector is `g*a_0, g*a_1, ..., g*a_{t-1}` for the coefficients `a_k` of the sharing polynomial.
//! Anyone can check a share against it but, unlike Pedersen's, it reveals `g*secret`.

use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_poly::univariate::DensePolynomial;
use ark_std::{collections::BTreeMap, rand::RngCore, vec::Vec, UniformRand};

use dkg_utils::msm::multiply_field_elems_with_same_group_elem;

use crate::{
    access_structure::ThresholdAccessStructure,
    common::{self, coefficients, ParticipantId, Share, Shares, VerificationVector},
    error::SSError,
    shamir_ss,
};

/// Generate a random secret with its shares according to Feldman's verifiable secret sharing.
/// Returns the secret, shares, the verification vector and the polynomial
pub fn deal_random_secret<R: RngCore, G: AffineRepr>(
    rng: &mut R,
    access_structure: &ThresholdAccessStructure,
    g: &G,
) -> (
    G::ScalarField,
    Shares<G::ScalarField>,
    VerificationVector<G>,
    DensePolynomial<G::ScalarField>,
) {
    let secret = G::ScalarField::rand(rng);
    let (shares, vv, poly) = deal_secret(rng, secret, access_structure, g);
    (secret, shares, vv, poly)
}

/// Same as `deal_random_secret` above but accepts the secret to share
pub fn deal_secret<R: RngCore, G: AffineRepr>(
    rng: &mut R,
    secret: G::ScalarField,
    access_structure: &ThresholdAccessStructure,
    g: &G,
) -> (
    Shares<G::ScalarField>,
    VerificationVector<G>,
    DensePolynomial<G::ScalarField>,
) {
    let (shares, poly) = shamir_ss::deal_secret(rng, secret, access_structure);
    let vv = commit_to_poly(&coefficients(&poly, access_structure.threshold()), g);
    (shares, vv, poly)
}

/// Feldman commitment to each coefficient, lowest degree first
pub fn commit_to_poly<G: AffineRepr>(coeffs: &[G::ScalarField], g: &G) -> VerificationVector<G> {
    G::Group::normalize_batch(&multiply_field_elems_with_same_group_elem(
        g.into_group(),
        coeffs,
    ))
    .into()
}

impl<F: PrimeField> Share<F> {
    /// Executed by each participant to verify its share received from the dealer.
    pub fn verify<G: AffineRepr<ScalarField = F>>(
        &self,
        verification_vector: &VerificationVector<G>,
        g: &G,
    ) -> Result<(), SSError> {
        if self.id == 0 {
            return Err(SSError::InvalidShareholderId(self.id));
        }
        if !verification_vector.supports_threshold(self.threshold) {
            return Err(SSError::DoesNotSupportThreshold(self.threshold));
        }
        if verification_vector.evaluate_at(self.id) != (*g * self.share).into_affine() {
            return Err(SSError::InvalidFeldmanShare);
        }
        Ok(())
    }
}

/// Verify each share against the verification vector and reconstruct the secret. Only an authorized set of
/// shareholders can reconstruct, so fewer than `threshold` shares is an error even when each share is valid.
pub fn reconstruct_and_verify<G: AffineRepr>(
    access_structure: &ThresholdAccessStructure,
    verification_vector: &VerificationVector<G>,
    g: &G,
    shares: &Shares<G::ScalarField>,
) -> Result<G::ScalarField, SSError> {
    let ids = shares.ids();
    common::check_distinct_non_zero(&ids)?;
    if !access_structure.is_authorized(&ids) {
        return Err(SSError::UnauthorizedSet);
    }
    for share in &shares.0 {
        if share.threshold != access_structure.threshold() {
            return Err(SSError::UnequalThresholdInReceivedShare(
                access_structure.threshold(),
                share.threshold,
            ));
        }
        share.verify(verification_vector, g)?;
    }
    shares.reconstruct_secret()
}

/// Interpolate in the exponent the public key `g*secret` from the public keys `g*share_i` of an authorized set of
/// shareholders. Uses the first `threshold` of them in ascending order of id.
pub fn reconstruct_threshold_public_key<G: AffineRepr>(
    access_structure: &ThresholdAccessStructure,
    partial_public_keys: &BTreeMap<ParticipantId, G>,
) -> Result<G, SSError> {
    let ids = partial_public_keys.keys().copied().collect::<Vec<_>>();
    if !access_structure.is_authorized(&ids) {
        return Err(SSError::UnauthorizedSet);
    }
    let threshold = access_structure.threshold() as usize;
    let (ids, pks): (Vec<_>, Vec<_>) = partial_public_keys
        .iter()
        .take(threshold)
        .map(|(id, pk)| (*id, *pk))
        .unzip();
    let basis = common::lagrange_basis_at_0_for_all::<G::ScalarField>(ids)?;
    Ok(G::Group::msm_unchecked(&pks, &basis).into_affine())
}
