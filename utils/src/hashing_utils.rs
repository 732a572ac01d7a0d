use crate::concat_slices;
use ark_ec::AffineRepr;
use digest::Digest;

/// Hash bytes to a point on the curve. Returns as Projective coordinates. This is vulnerable to timing attack and is only used when input
/// is public anyway like when generating setup parameters.
pub fn projective_group_elem_from_try_and_incr<G: AffineRepr, D: Digest>(bytes: &[u8]) -> G::Group {
    let mut hash = D::digest(bytes);
    let mut g = G::from_random_bytes(&hash);
    let mut j = 1u64;
    while g.is_none() {
        hash = D::digest(&concat_slices!(bytes, b"-attempt-", j.to_le_bytes()));
        g = G::from_random_bytes(&hash);
        j += 1;
    }
    // Loop exits only when `g` is `Some`
    g.map(|g| g.mul_by_cofactor_to_group()).unwrap_or_default()
}

/// Hash bytes to a point on the curve. Returns as Affine coordinates. This is vulnerable to timing attack and is only used when input
/// is public anyway like when generating setup parameters.
pub fn affine_group_elem_from_try_and_incr<G: AffineRepr, D: Digest>(bytes: &[u8]) -> G {
    projective_group_elem_from_try_and_incr::<G, D>(bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{G1Affine, G2Affine};
    use ark_ec::AffineRepr;
    use blake2::Blake2b512;
    use sha3::Sha3_512;

    #[test]
    fn hash_to_group_is_deterministic_and_label_separated() {
        fn check<G: AffineRepr>() {
            let a = affine_group_elem_from_try_and_incr::<G, Blake2b512>(b"label : H");
            let b = affine_group_elem_from_try_and_incr::<G, Blake2b512>(b"label : H");
            let c = affine_group_elem_from_try_and_incr::<G, Blake2b512>(b"label : G");
            let d = affine_group_elem_from_try_and_incr::<G, Sha3_512>(b"label : H");
            assert_eq!(a, b);
            assert_ne!(a, c);
            assert_ne!(a, d);
            assert!(!a.is_zero());
            assert_ne!(a, G::generator());
        }
        check::<G1Affine>();
        check::<G2Affine>();
        check::<ark_secp256r1::Affine>();
    }
}
