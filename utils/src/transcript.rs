use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use ark_std::{vec, vec::Vec};

pub use merlin::Transcript as MerlinTranscript;

/// must be specific to the application.
pub fn new_merlin_transcript(label: &'static [u8]) -> MerlinTranscript {
    MerlinTranscript::new(label)
}

/// Transcript is the application level transcript to derive the challenges needed for Fiat Shamir.
/// It is given to the prover/verifier so that the transcript can be fed with any other data first, like
/// a session id or the protocol's public parameters. Cloning a transcript forks it, the fork keeps
/// everything appended so far and evolves independently afterwards.
pub trait Transcript: Clone {
    /// Append a label that separates the protocol or sub-protocol using this transcript from others
    fn append_domain_separator(&mut self, label: &'static [u8]);
    fn append_message(&mut self, label: &'static [u8], message: &[u8]);
    /// Append the compressed canonical encoding of `element`
    fn append<S: CanonicalSerialize>(&mut self, label: &'static [u8], element: &S);
    fn challenge_bytes(&mut self, label: &'static [u8], dest: &mut [u8]);
    fn challenge_scalar<F: PrimeField>(&mut self, label: &'static [u8]) -> F;
}

impl Transcript for MerlinTranscript {
    fn append_domain_separator(&mut self, label: &'static [u8]) {
        MerlinTranscript::append_message(self, b"dom-sep", label);
    }

    fn append_message(&mut self, label: &'static [u8], message: &[u8]) {
        MerlinTranscript::append_message(self, label, message);
    }

    fn append<S: CanonicalSerialize>(&mut self, label: &'static [u8], element: &S) {
        let mut buff: Vec<u8> = vec![0; element.compressed_size()];
        element
            .serialize_compressed(&mut buff[..])
            .expect("serialization failed");
        MerlinTranscript::append_message(self, label, &buff);
    }

    fn challenge_bytes(&mut self, label: &'static [u8], dest: &mut [u8]) {
        MerlinTranscript::challenge_bytes(self, label, dest);
    }

    fn challenge_scalar<F: PrimeField>(&mut self, label: &'static [u8]) -> F {
        // Reduce a double-width scalar to ensure a uniform distribution
        let mut buf = [0; 64];
        MerlinTranscript::challenge_bytes(self, label, &mut buf);
        F::from_le_bytes_mod_order(&buf)
    }
}
