use ark_bls12_381::Bls12_381;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_std::{
    rand::{rngs::StdRng, SeedableRng},
    UniformRand,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dkg_utils::transcript::new_merlin_transcript;
use schnorr_pok::{batch_discrete_log::PokBatchDiscreteLogProtocol, compiler::FiatShamir};

type Fr = <Bls12_381 as Pairing>::ScalarField;

macro_rules! bench_batch {
    ($group_affine:ident, $c: ident) => {
        let mut rng = StdRng::seed_from_u64(0u64);
        let counts = [2, 4, 8, 15, 20, 30, 40, 60];
        let base = <Bls12_381 as Pairing>::$group_affine::generator();

        let witnesses_vec = counts
            .iter()
            .map(|count| (0..*count).map(|_| Fr::rand(&mut rng)).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let statements_vec = witnesses_vec
            .iter()
            .map(|w| {
                <<Bls12_381 as Pairing>::$group_affine as AffineRepr>::Group::normalize_batch(
                    &w.iter().map(|w_i| base * w_i).collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();

        let mut proof_group = $c.benchmark_group("Batch proof generation");
        for (i, count) in counts.iter().enumerate() {
            proof_group.bench_with_input(
                BenchmarkId::from_parameter(format!("{} elements", count)),
                count,
                |b, &_count| {
                    b.iter(|| {
                        let blinding = Fr::rand(&mut rng);
                        let protocol = PokBatchDiscreteLogProtocol::init(
                            black_box(witnesses_vec[i].clone()),
                            blinding,
                            black_box(&base),
                        )
                        .unwrap();
                        let challenge = Fr::rand(&mut rng);
                        protocol.gen_proof(&challenge)
                    });
                },
            );
        }
        proof_group.finish();

        let transcript = new_merlin_transcript(b"bench");
        let proofs = witnesses_vec
            .iter()
            .zip(statements_vec.iter())
            .map(|(w, s)| {
                FiatShamir::new(transcript.clone(), b"session", b"prover")
                    .prove_batch_discrete_log(&mut rng, &base, s, w.clone())
                    .unwrap()
            })
            .collect::<Vec<_>>();

        // Includes the challenge computation as each verifier computes it from the transcript
        let mut verif_group = $c.benchmark_group("Batch proof verification");
        for (i, count) in counts.iter().enumerate() {
            verif_group.bench_with_input(
                BenchmarkId::from_parameter(format!("{} elements", count)),
                count,
                |b, &_count| {
                    b.iter(|| {
                        FiatShamir::new(transcript.clone(), b"session", b"prover")
                            .verify_batch_discrete_log(
                                black_box(&base),
                                black_box(&statements_vec[i]),
                                black_box(&proofs[i]),
                            )
                            .unwrap()
                    });
                },
            );
        }
        verif_group.finish();
    };
}

fn schnorr_batch_g1(c: &mut Criterion) {
    bench_batch!(G1Affine, c);
}

fn schnorr_batch_g2(c: &mut Criterion) {
    bench_batch!(G2Affine, c);
}

criterion_group!(benches, schnorr_batch_g1, schnorr_batch_g2);
criterion_main!(benches);
