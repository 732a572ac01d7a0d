//! Runs all participants of a session in the same process. Each round is run for all participants before the next
//! one starts and the messages of a round are routed to their receivers in between. With the `parallel` feature,
//! participants run a round concurrently but each participant is only ever used by one thread at a time.

use ark_ec::AffineRepr;
use ark_std::{cfg_iter_mut, collections::BTreeMap, rand::RngCore, vec::Vec};
use dkg_utils::{aliases::SendIfParallel, transcript::Transcript};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{
    messages::{Round1Broadcast, Round2Broadcast, Round2Unicast},
    output::DkgOutput,
    participant::Participant,
    DkgParams,
};
use crate::{common::ParticipantId, error::DkgError};

/// Create a participant for each shareholder, all with the same transcript and each with its own RNG
pub fn new_participants<G, R, T>(
    params: &DkgParams<G>,
    transcript: &T,
    mut rng_for: impl FnMut(ParticipantId) -> R,
) -> Result<Vec<Participant<G, R, T>>, DkgError>
where
    G: AffineRepr,
    R: RngCore,
    T: Transcript,
{
    params
        .access_structure()
        .shareholders()
        .iter()
        .map(|id| Participant::new(params.clone(), *id, transcript.clone(), rng_for(*id)))
        .collect()
}

pub fn do_round1<G, R, T>(
    participants: &mut [Participant<G, R, T>],
) -> Result<BTreeMap<ParticipantId, Round1Broadcast<G>>, DkgError>
where
    G: AffineRepr,
    R: RngCore + SendIfParallel,
    T: Transcript + SendIfParallel,
{
    cfg_iter_mut!(participants)
        .map(|p| {
            let id = p.id();
            p.round1().map(|msg| (id, msg))
        })
        .collect()
}

/// `inbound` has for each receiver the messages of all other participants, as returned by `map_broadcast_o2i`
pub fn do_round2<G, R, T>(
    participants: &mut [Participant<G, R, T>],
    inbound: &BTreeMap<ParticipantId, BTreeMap<ParticipantId, Round1Broadcast<G>>>,
) -> Result<
    (
        BTreeMap<ParticipantId, Round2Broadcast<G>>,
        BTreeMap<ParticipantId, BTreeMap<ParticipantId, Round2Unicast<G>>>,
    ),
    DkgError,
>
where
    G: AffineRepr,
    R: RngCore + SendIfParallel,
    T: Transcript + SendIfParallel,
{
    let empty = BTreeMap::new();
    let outputs = cfg_iter_mut!(participants)
        .map(|p| {
            let id = p.id();
            p.round2(inbound.get(&id).unwrap_or(&empty))
                .map(|(broadcast, unicasts)| (id, broadcast, unicasts))
        })
        .collect::<Result<Vec<_>, DkgError>>()?;
    let mut broadcasts = BTreeMap::new();
    let mut unicasts = BTreeMap::new();
    for (id, b, u) in outputs {
        broadcasts.insert(id, b);
        unicasts.insert(id, u);
    }
    Ok((broadcasts, unicasts))
}

pub fn do_round3<G, R, T>(
    participants: &mut [Participant<G, R, T>],
    inbound_broadcasts: &BTreeMap<ParticipantId, BTreeMap<ParticipantId, Round2Broadcast<G>>>,
    inbound_unicasts: &BTreeMap<ParticipantId, BTreeMap<ParticipantId, Round2Unicast<G>>>,
) -> Result<BTreeMap<ParticipantId, DkgOutput<G>>, DkgError>
where
    G: AffineRepr,
    R: RngCore + SendIfParallel,
    T: Transcript + SendIfParallel,
{
    let empty_broadcasts = BTreeMap::new();
    let empty_unicasts = BTreeMap::new();
    cfg_iter_mut!(participants)
        .map(|p| {
            let id = p.id();
            p.round3(
                inbound_broadcasts.get(&id).unwrap_or(&empty_broadcasts),
                inbound_unicasts.get(&id).unwrap_or(&empty_unicasts),
            )
            .map(|output| (id, output))
        })
        .collect()
}

/// Map broadcasts by sender to broadcasts by receiver. Every sender's message goes to every other sender.
pub fn map_broadcast_o2i<M: Clone>(
    outputs: &BTreeMap<ParticipantId, M>,
) -> BTreeMap<ParticipantId, BTreeMap<ParticipantId, M>> {
    outputs
        .keys()
        .map(|receiver| {
            (
                *receiver,
                outputs
                    .iter()
                    .filter(|(sender, _)| *sender != receiver)
                    .map(|(sender, msg)| (*sender, msg.clone()))
                    .collect(),
            )
        })
        .collect()
}

/// Map unicasts from `sender -> receiver -> message` to `receiver -> sender -> message`
pub fn map_unicast_o2i<M>(
    outputs: BTreeMap<ParticipantId, BTreeMap<ParticipantId, M>>,
) -> BTreeMap<ParticipantId, BTreeMap<ParticipantId, M>> {
    let mut inbound = BTreeMap::<ParticipantId, BTreeMap<ParticipantId, M>>::new();
    for (sender, messages) in outputs {
        for (receiver, msg) in messages {
            inbound.entry(receiver).or_default().insert(sender, msg);
        }
    }
    inbound
}

/// Run all rounds for all `participants`, which must all be in round 1
pub fn run_dkg<G, R, T>(
    participants: &mut [Participant<G, R, T>],
) -> Result<BTreeMap<ParticipantId, DkgOutput<G>>, DkgError>
where
    G: AffineRepr,
    R: RngCore + SendIfParallel,
    T: Transcript + SendIfParallel,
{
    let r1 = do_round1(participants)?;
    let (r2_broadcasts, r2_unicasts) = do_round2(participants, &map_broadcast_o2i(&r1))?;
    do_round3(
        participants,
        &map_broadcast_o2i(&r2_broadcasts),
        &map_unicast_o2i(r2_unicasts),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_routing() {
        let broadcasts = (1..=3u16).map(|i| (i, i * 10)).collect::<BTreeMap<_, _>>();
        let inbound = map_broadcast_o2i(&broadcasts);
        assert_eq!(inbound.len(), 3);
        assert_eq!(
            inbound[&2].iter().map(|(s, m)| (*s, *m)).collect::<Vec<_>>(),
            vec![(1, 10), (3, 30)]
        );

        let mut unicasts = BTreeMap::new();
        for sender in 1..=3u16 {
            let to = (1..=3u16)
                .filter(|r| *r != sender)
                .map(|r| (r, (sender, r)))
                .collect::<BTreeMap<_, _>>();
            unicasts.insert(sender, to);
        }
        let inbound = map_unicast_o2i(unicasts);
        for (receiver, msgs) in &inbound {
            assert_eq!(msgs.len(), 2);
            for (sender, (s, r)) in msgs {
                assert_eq!(sender, s);
                assert_eq!(receiver, r);
            }
        }
    }
}
