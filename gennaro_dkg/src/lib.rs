#![cfg_attr(not(feature = "std"), no_std)]

//! # Gennaro distributed key generation
//!
//! Distributed Key Generation (DKG) without a trusted dealer over any prime order group, with identifiable abort:
//! when a participant's messages fail verification, honest participants learn who deviated from the protocol.
//! Built on the following
//!
//! 1. [Threshold access structure](./src/access_structure.rs)
//! 1. [Shamir secret sharing (Requires a trusted dealer)](./src/shamir_ss.rs)
//! 1. [Pedersen Verifiable Secret Sharing](./src/pedersen_vss.rs)
//! 1. [Feldman Verifiable Secret Sharing](./src/feldman_vss.rs)
//! 1. [Gennaro DKG from the paper Secure Distributed Key Generation for Discrete-Log Based Cryptosystems](./src/gennaro)
//!
//! A participant never does any I/O. The caller exchanges the messages of each round, or uses
//! [`gennaro::runner`] to run all participants in one process.

pub mod access_structure;
pub mod common;
pub mod error;
pub mod feldman_vss;
pub mod gennaro;
pub mod pedersen_vss;
pub mod shamir_ss;
