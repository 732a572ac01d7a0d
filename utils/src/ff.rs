use ark_ff::PrimeField;
use ark_std::{vec, vec::Vec};

/// Return `[1, element, element^2, ..., element^{n-1}]`
pub fn powers<F: PrimeField>(element: &F, n: usize) -> Vec<F> {
    if n == 0 {
        return vec![];
    }
    let mut powers = Vec::with_capacity(n);
    powers.push(F::one());
    for i in 1..n {
        powers.push(powers[i - 1] * element);
    }
    powers
}

/// Evaluate the polynomial with coefficients `coeffs` (lowest degree first) at `point` using Horner's method
pub fn evaluate_poly<F: PrimeField>(coeffs: &[F], point: &F) -> F {
    coeffs
        .iter()
        .rev()
        .fold(F::zero(), |acc, c| acc * point + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };

    #[test]
    fn powers_and_evaluation() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let x = Fr::rand(&mut rng);
        assert!(powers(&x, 0).is_empty());
        assert_eq!(powers(&x, 1), vec![Fr::from(1u64)]);
        let p = powers(&x, 5);
        assert_eq!(p[4], x * x * x * x);

        let coeffs = (0..5).map(|_| Fr::rand(&mut rng)).collect::<Vec<_>>();
        let expected = coeffs
            .iter()
            .zip(p.iter())
            .fold(Fr::from(0u64), |acc, (c, x_i)| acc + *c * x_i);
        assert_eq!(evaluate_poly(&coeffs, &x), expected);
        assert_eq!(evaluate_poly(&coeffs, &Fr::from(0u64)), coeffs[0]);
        assert_eq!(evaluate_poly::<Fr>(&[], &x), Fr::from(0u64));
    }
}
