use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use ark_poly::univariate::DensePolynomial;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, cfg_iter, collections::BTreeSet, vec::Vec};
use dkg_utils::{expect_equality, serde_utils::ArkObjectBytes};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SSError;

pub type ShareId = u16;

pub type ParticipantId = u16;

/// Share used in Shamir secret sharing and Feldman verifiable secret sharing
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Share<F: PrimeField> {
    pub id: ShareId,
    pub threshold: ShareId,
    #[serde_as(as = "ArkObjectBytes")]
    pub share: F,
}

/// Collection of `Share`s. A sufficient number of `Share`s reconstruct the secret.
/// Expects unique shares, i.e. each share has a different `ShareId` and each has the same threshold.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct Shares<F: PrimeField>(pub Vec<Share<F>>);

/// Share used in Pedersen verifiable secret sharing
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct VerifiableShare<F: PrimeField> {
    pub id: ShareId,
    pub threshold: ShareId,
    #[serde_as(as = "ArkObjectBytes")]
    pub secret_share: F,
    #[serde_as(as = "ArkObjectBytes")]
    pub blinding_share: F,
}

/// Collection of `VerifiableShares`s. A sufficient number of `VerifiableShares`s reconstruct the secret.
/// Expects unique shares, i.e. each share has a different `ShareId` and each has the same threshold.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct VerifiableShares<F: PrimeField>(pub Vec<VerifiableShare<F>>);

/// Commitments to the coefficients of a polynomial created during secret sharing, lowest degree first. Each
/// commitment could be a Pedersen commitment `g*a_k + h*b_k` or a Feldman commitment `g*a_k`. The former
/// is used in Pedersen secret sharing and the latter in Feldman. A vector for threshold `t` has `t` elements.
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct VerificationVector<G: AffineRepr>(#[serde_as(as = "Vec<ArkObjectBytes>")] pub Vec<G>);

impl<F: PrimeField> Drop for Share<F> {
    fn drop(&mut self) {
        self.share.zeroize();
    }
}

impl<F: PrimeField> From<(ShareId, ShareId, F)> for Share<F> {
    fn from((i, t, s): (ShareId, ShareId, F)) -> Self {
        Share {
            id: i,
            threshold: t,
            share: s,
        }
    }
}

impl<F: PrimeField> Drop for VerifiableShare<F> {
    fn drop(&mut self) {
        self.secret_share.zeroize();
        self.blinding_share.zeroize();
    }
}

impl<F: PrimeField> Shares<F> {
    pub fn threshold(&self) -> ShareId {
        self.0.first().map(|s| s.threshold).unwrap_or_default()
    }

    pub fn ids(&self) -> Vec<ShareId> {
        self.0.iter().map(|s| s.id).collect()
    }
}

impl<F: PrimeField> VerifiableShares<F> {
    pub fn threshold(&self) -> ShareId {
        self.0.first().map(|s| s.threshold).unwrap_or_default()
    }
}

impl<F: PrimeField> VerifiableShare<F> {
    /// The part of this share that is a share of the secret, without the blinding
    pub fn secret_part(&self) -> Share<F> {
        Share {
            id: self.id,
            threshold: self.threshold,
            share: self.secret_share,
        }
    }
}

impl<G: AffineRepr> From<Vec<G>> for VerificationVector<G> {
    fn from(coeffs: Vec<G>) -> Self {
        VerificationVector(coeffs)
    }
}

impl<G: AffineRepr> VerificationVector<G> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The constant coefficient is the secret and thus returns the commitment to that. This is the
    /// evaluation at 0 so the identity for an empty vector.
    pub fn commitment_to_secret(&self) -> G {
        self.0.first().copied().unwrap_or_else(G::zero)
    }

    /// The degree of the polynomial whose coefficients were committed
    pub fn poly_degree(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn supports_threshold(&self, threshold: ShareId) -> bool {
        threshold >= 1 && self.0.len() == threshold as usize
    }

    /// Evaluate the committed polynomial at `x` in the exponent, i.e. `V[0] + V[1]*x + V[2]*x^2 + ...`, with
    /// Horner's method `((V[t-1]*x + V[t-2])*x + ... )*x + V[0]`
    pub fn evaluate_as_projective(&self, x: &G::ScalarField) -> G::Group {
        self.0
            .iter()
            .rev()
            .fold(G::Group::zero(), |acc, c| acc * x + c.into_group())
    }

    pub fn evaluate(&self, x: &G::ScalarField) -> G {
        self.evaluate_as_projective(x).into_affine()
    }

    /// Evaluation at a shareholder's id. This is the commitment to that shareholder's share.
    pub fn evaluate_at(&self, id: ShareId) -> G {
        self.evaluate(&G::ScalarField::from(id as u64))
    }

    /// Component-wise addition. The result commits to the sum of both polynomials.
    pub fn try_add(&self, other: &Self) -> Result<Self, SSError> {
        expect_equality!(
            self.0.len(),
            other.0.len(),
            SSError::UnequalVerificationVectorLength
        );
        let sum = cfg_iter!(self.0)
            .zip(cfg_iter!(other.0))
            .map(|(a, b)| a.into_group() + b.into_group())
            .collect::<Vec<_>>();
        Ok(Self(G::Group::normalize_batch(&sum)))
    }

    /// Component-wise sum of many vectors, all of which must have the same length
    pub fn try_sum<'a>(vectors: impl IntoIterator<Item = &'a Self>) -> Result<Self, SSError>
    where
        G: 'a,
    {
        let mut vectors = vectors.into_iter();
        let mut sum = match vectors.next() {
            Some(v) => v.0.iter().map(|c| c.into_group()).collect::<Vec<_>>(),
            None => return Ok(Self(Vec::new())),
        };
        for v in vectors {
            expect_equality!(sum.len(), v.0.len(), SSError::UnequalVerificationVectorLength);
            for (a, c) in sum.iter_mut().zip(v.0.iter()) {
                *a += c.into_group();
            }
        }
        Ok(Self(G::Group::normalize_batch(&sum)))
    }
}

/// Coefficients of `poly` padded with zeroes to `threshold` elements, lowest degree first. `DensePolynomial` drops
/// leading zero coefficients, a verification vector for `threshold` still needs one commitment per coefficient.
pub(crate) fn coefficients<F: PrimeField>(poly: &DensePolynomial<F>, threshold: ShareId) -> Vec<F> {
    let mut coeffs = poly.coeffs.clone();
    if coeffs.len() < threshold as usize {
        coeffs.resize(threshold as usize, F::zero());
    }
    coeffs
}

/// Ids must be non-zero and unique, otherwise interpolation is not defined
pub(crate) fn check_distinct_non_zero(x_coords: &[ShareId]) -> Result<(), SSError> {
    let mut seen = BTreeSet::new();
    for x in x_coords {
        if *x == 0 {
            return Err(SSError::InvalidShareholderId(*x));
        }
        if !seen.insert(*x) {
            return Err(SSError::DuplicateShareholderId(*x));
        }
    }
    Ok(())
}

/// Return the Lagrange basis polynomial at x = 0 given the `x` coordinates
/// `(x_coords[0]) * (x_coords[1]) * ... / ((x_coords[0] - i) * (x_coords[1] - i) * ...)`
/// Errors if the `x` coordinates are not distinct and non-zero or `i` is not one of them
pub fn lagrange_basis_at_0<F: PrimeField>(x_coords: &[ShareId], i: ShareId) -> Result<F, SSError> {
    check_distinct_non_zero(x_coords)?;
    if !x_coords.contains(&i) {
        return Err(SSError::InvalidShareholderId(i));
    }
    let mut numerator = F::one();
    let mut denominator = F::one();
    let i_f = F::from(i as u64);
    for x in x_coords {
        if *x == i {
            continue;
        }
        let x = F::from(*x as u64);
        numerator *= x;
        denominator *= x - i_f;
    }
    let denominator = denominator
        .inverse()
        .ok_or(SSError::InvalidShareholderId(i))?;
    Ok(numerator * denominator)
}

/// Return the Lagrange basis polynomial at x = 0 for each of the given `x` coordinates. Faster than
/// doing multiple calls to `lagrange_basis_at_0`
pub fn lagrange_basis_at_0_for_all<F: PrimeField>(x_coords: Vec<ShareId>) -> Result<Vec<F>, SSError> {
    check_distinct_non_zero(&x_coords)?;
    let x = cfg_into_iter!(x_coords.as_slice())
        .map(|x| F::from(*x as u64))
        .collect::<Vec<_>>();

    // Product of all `x`, i.e. \prod_{i}(x_i}
    let product = cfg_iter!(x).product::<F>();

    // Distinct non-zero ids below the field's characteristic, so neither the ids nor their differences are 0
    Ok(cfg_iter!(x)
        .map(|i| {
            let denominator = cfg_iter!(x)
                .filter(|&j| i != j)
                .map(|&j| j - i)
                .product::<F>();

            // The numerator is of the form `x_1*x_2*...x_{i-1}*x_{i+1}*x_{i+2}*..` which is a product of all
            // `x` except `x_i` and thus can be calculated as \prod_{i}(x_i} * (1 / x_i)
            let numerator = product * i.inverse().unwrap_or_default();

            denominator.inverse().unwrap_or_default() * numerator
        })
        .collect::<Vec<_>>())
}
