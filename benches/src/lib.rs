use ark_ec::AffineRepr;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use blake2::Blake2b512;
use dkg_utils::transcript::{new_merlin_transcript, MerlinTranscript};
use gennaro_dkg::{
    access_structure::ThresholdAccessStructure,
    common::ShareId,
    gennaro::{runner::new_participants, DkgParams, Participant},
};

/// Hardcoding `(threshold, total)` pairs. This should ideally be taken/updated from command line input
pub const THRESHOLD_TOTAL: [(ShareId, ShareId); 6] =
    [(2, 3), (3, 5), (5, 10), (10, 20), (20, 40), (34, 50)];

/// All participants of a fresh session, ready for round 1
pub fn setup_participants<G: AffineRepr>(
    threshold: ShareId,
    total: ShareId,
    seed: u64,
) -> Vec<Participant<G, StdRng, MerlinTranscript>> {
    let access_structure = ThresholdAccessStructure::new_ordinal(threshold, total).unwrap();
    let params =
        DkgParams::<G>::new::<Blake2b512>(b"bench-session".to_vec(), access_structure, b"bench")
            .unwrap();
    new_participants(&params, &new_merlin_transcript(b"bench"), |id| {
        StdRng::seed_from_u64(seed + id as u64)
    })
    .unwrap()
}
