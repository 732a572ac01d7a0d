#![cfg_attr(not(feature = "std"), no_std)]

//! Common code shared by the secret sharing, proof of knowledge and DKG crates: transcripts for
//! Fiat-Shamir, Pedersen commitment keys, hashing to the group, serde support for arkworks types and
//! a few helpers over field elements and multi-scalar multiplication.

#[macro_use]
pub mod macros;
pub mod aliases;
pub mod commitment;
pub mod ff;
pub mod hashing_utils;
pub mod msm;
pub mod serde_utils;
pub mod transcript;
