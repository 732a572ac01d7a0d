//! Serde serialization for `arkworks-rs` objects they themselves don't implement serde

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

pub type ArkObjectBytes = AsCanonical;

/// Serializes any `T: CanonicalSerialize + CanonicalDeserialize` as the byte string of its compressed
/// canonical encoding. Deserialization runs the arkworks validity checks (on curve, in subgroup).
pub struct AsCanonical;

impl AsCanonical {
    pub fn serialize<S, T>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalSerialize,
        S: Serializer,
    {
        let size = x.compressed_size();
        let mut bytes = Vec::with_capacity(size);
        x.serialize_compressed(&mut bytes)
            .map_err(serde::ser::Error::custom)?;
        Serialize::serialize(&bytes, serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let y: Vec<u8> = Deserialize::deserialize(deserializer)?;
        T::deserialize_compressed(y.as_slice()).map_err(serde::de::Error::custom)
    }
}

impl<T> SerializeAs<T> for AsCanonical
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(x, serializer)
    }
}

impl<'de, T> DeserializeAs<'de, T> for AsCanonical
where
    T: CanonicalDeserialize,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{Fr, G1Affine};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use serde_with::serde_as;

    #[serde_as]
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde_as(as = "ArkObjectBytes")]
        scalar: Fr,
        #[serde_as(as = "Vec<ArkObjectBytes>")]
        points: Vec<G1Affine>,
    }

    #[test]
    fn ark_objects_through_serde() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let w = Wrapper {
            scalar: Fr::rand(&mut rng),
            points: (0..3).map(|_| G1Affine::rand(&mut rng)).collect(),
        };
        let ser = serde_json::to_string(&w).unwrap();
        let deser = serde_json::from_str::<Wrapper>(&ser).unwrap();
        assert_eq!(w, deser);

        // Truncated encoding is rejected
        let bad = serde_json::to_string(&vec![1u8, 2, 3]).unwrap();
        let mut de = serde_json::Deserializer::from_str(&bad);
        assert!(AsCanonical::deserialize::<_, Fr>(&mut de).is_err());
    }
}
