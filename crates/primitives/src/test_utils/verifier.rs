use crate::{PairingVerifier, ProofVerifier};

use alloy_primitives::B256;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A proof verifier returning a configurable result.
#[derive(Debug, Clone)]
pub struct MockProofVerifier {
    result: Arc<AtomicBool>,
}

impl MockProofVerifier {
    /// Returns a verifier accepting every proof.
    pub fn accepting() -> Self {
        Self { result: Arc::new(AtomicBool::new(true)) }
    }

    /// Sets the result returned by the verifier.
    pub fn set_result(&self, result: bool) {
        self.result.store(result, Ordering::Relaxed);
    }
}

impl ProofVerifier for MockProofVerifier {
    fn verify(&self, _proof: &[u8], _public_inputs_hash: B256) -> bool {
        self.result.load(Ordering::Relaxed)
    }
}

/// A pairing verifier returning a configurable result.
#[derive(Debug, Clone)]
pub struct MockPairingVerifier {
    result: Arc<AtomicBool>,
}

impl MockPairingVerifier {
    /// Returns a verifier accepting every signature.
    pub fn accepting() -> Self {
        Self { result: Arc::new(AtomicBool::new(true)) }
    }

    /// Sets the result returned by the verifier.
    pub fn set_result(&self, result: bool) {
        self.result.store(result, Ordering::Relaxed);
    }
}

impl PairingVerifier for MockPairingVerifier {
    fn pairing(
        &self,
        _agg_pubkey: &[B256; 2],
        _agg_signature: &[B256; 4],
        _message_point: &[B256; 4],
    ) -> bool {
        self.result.load(Ordering::Relaxed)
    }
}
