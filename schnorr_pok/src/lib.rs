#![cfg_attr(not(feature = "std"), no_std)]

//! Schnorr protocol to prove knowledge of discrete logs in zero knowledge. Refer <https://crypto.stanford.edu/cs355/19sp/lec5.pdf>
//!
//! 1. [Batched proof of knowledge of discrete logs of several elements w.r.t. one base](./src/batch_discrete_log.rs)
//! 1. [Fiat-Shamir compiler binding proofs to a session and a prover](./src/compiler.rs)

pub mod batch_discrete_log;
pub mod compiler;
pub mod error;
