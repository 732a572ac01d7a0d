use benches::{setup_participants, THRESHOLD_TOTAL};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gennaro_dkg::gennaro::runner::{
    do_round1, do_round2, map_broadcast_o2i, map_unicast_o2i, run_dkg,
};
use test_utils::{G1, G2};

macro_rules! bench_dkg {
    ($group:ident, $c: ident) => {
        let mut full_group = $c.benchmark_group(format!("Full DKG in {}", stringify!($group)));
        full_group.sample_size(10);
        for (threshold, total) in THRESHOLD_TOTAL {
            full_group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}-of-{}", threshold, total)),
                &(threshold, total),
                |b, &(threshold, total)| {
                    b.iter_batched(
                        || setup_participants::<$group>(threshold, total, 0),
                        |mut participants| run_dkg(black_box(&mut participants)).unwrap(),
                        criterion::BatchSize::LargeInput,
                    )
                },
            );
        }
        full_group.finish();

        // Round 3 dominates as each participant verifies everyone else's share and proof
        let mut round3_group =
            $c.benchmark_group(format!("Round 3 for one participant in {}", stringify!($group)));
        round3_group.sample_size(10);
        for (threshold, total) in THRESHOLD_TOTAL {
            round3_group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}-of-{}", threshold, total)),
                &(threshold, total),
                |b, &(threshold, total)| {
                    b.iter_batched(
                        || {
                            let mut participants = setup_participants::<$group>(threshold, total, 0);
                            let r1 = do_round1(&mut participants).unwrap();
                            let (broadcasts, unicasts) =
                                do_round2(&mut participants, &map_broadcast_o2i(&r1)).unwrap();
                            let mut inbound_broadcasts = map_broadcast_o2i(&broadcasts);
                            let mut inbound_unicasts = map_unicast_o2i(unicasts);
                            let p = participants.swap_remove(0);
                            let id = p.id();
                            (
                                p,
                                inbound_broadcasts.remove(&id).unwrap(),
                                inbound_unicasts.remove(&id).unwrap(),
                            )
                        },
                        |(mut p, broadcasts, unicasts)| {
                            p.round3(black_box(&broadcasts), black_box(&unicasts))
                                .unwrap()
                        },
                        criterion::BatchSize::LargeInput,
                    )
                },
            );
        }
        round3_group.finish();
    };
}

fn dkg_g1(c: &mut Criterion) {
    bench_dkg!(G1, c);
}

fn dkg_g2(c: &mut Criterion) {
    bench_dkg!(G2, c);
}

criterion_group!(benches, dkg_g1, dkg_g2);
criterion_main!(benches);
