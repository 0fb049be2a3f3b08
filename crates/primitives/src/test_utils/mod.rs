pub use verifier::{MockPairingVerifier, MockProofVerifier};
mod verifier;

#[doc(hidden)]
pub mod arbitrary;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Installs a test writer subscriber filtered by `RUST_LOG`, once per process.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}
